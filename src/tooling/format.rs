//! Format tree rows and record details as text.

use crate::tree::{Record, RecordKind};
use crate::views::{render_text, TreeRow};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format the visible tree under a heading.
pub fn format_tree_text(root_path: &str, rows: &[TreeRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Records under {}", root_path))
    ));
    if rows.is_empty() {
        out.push_str("  (no records)\n");
        return out;
    }
    out.push_str(&render_text(rows));
    out
}

/// Format one record and its metadata store.
pub fn format_record_text(record: &Record) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(&record.title)));
    out.push_str(&format!("  Id:   {}\n", record.id));
    out.push_str(&format!("  Path: {}\n", record.path));
    let kind = match record.kind {
        RecordKind::Container => "container",
        RecordKind::Leaf => "leaf",
    };
    out.push_str(&format!("  Kind: {}\n\n", kind));

    if record.meta_store.is_empty() {
        out.push_str("  No metadata\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Key", "Value"]);
    for (key, value) in &record.meta_store {
        table.add_row(vec![key.clone(), value.clone()]);
    }
    out.push_str(&format!("{}\n", table));
    out
}
