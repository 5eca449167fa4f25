//! End-to-end flows across the engine and TUI crates.

mod catalog_file;
mod config;
mod navigation;
