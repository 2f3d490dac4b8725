//! Curate Tree CLI Binary
//!
//! Command-line browser for archival records held by a tree-metadata service.

use clap::Parser;
use curate_tree::logging::init_logging;
use curate_tree::tooling::cli::{Cli, CliContext, Commands};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&context.config().logging) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    if let Commands::Watch { cycles } = &cli.command {
        if let Err(e) = context.watch(*cycles, |tree| println!("{}", tree)).await {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    match context.execute(&cli.command).await {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
