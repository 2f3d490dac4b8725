//! Controller behaviour driven through a scripted fetcher

mod browse_flow;
mod refresh;
mod selection;
