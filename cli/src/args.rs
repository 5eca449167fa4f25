use clap::Parser;
use std::path::PathBuf;

use modguide_engine::{ExpansionKey, GuideConfig, UiOptions};

#[derive(Debug, Parser)]
#[command(name = "modguide")]
#[command(about = "Compare Microsoft 365 PowerShell modules from the terminal", long_about = None)]
#[command(version)]
pub struct Args {
    /// Catalog file to load instead of the built-in one
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Print the guide as plain text and exit
    #[arg(long)]
    pub print: bool,

    /// Column width used by --print
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u16).range(20..))]
    pub width: u16,

    /// Expand an entry before printing or starting the UI (e.g. `open:Teams`
    /// or `grid:Microsoft.Graph`); may be repeated
    #[arg(long = "expand", value_name = "KEY")]
    pub expand: Vec<ExpansionKey>,

    /// Use ASCII-only glyphs
    #[arg(long)]
    pub ascii: bool,

    /// Use the high-contrast palette
    #[arg(long)]
    pub high_contrast: bool,
}

impl Args {
    /// Flags only ever switch an option on; otherwise the config decides.
    pub fn ui_options(&self, config: Option<&GuideConfig>) -> UiOptions {
        let base = config.map(GuideConfig::ui_options).unwrap_or_default();
        UiOptions {
            ascii_only: self.ascii || base.ascii_only,
            high_contrast: self.high_contrast || base.high_contrast,
        }
    }

    pub fn catalog_path(&self, config: Option<&GuideConfig>) -> Option<PathBuf> {
        self.catalog
            .clone()
            .or_else(|| config.and_then(GuideConfig::catalog_path))
    }
}
