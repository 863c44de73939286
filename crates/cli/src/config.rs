//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use stockroom_observability::LogFormat;

/// Default data file offered by the save and load prompts.
pub const DEFAULT_DATA_FILE: &str = "inventory.json";

#[derive(Debug, Clone, Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Interactive inventory tracker")]
pub struct Config {
    /// Data file used when the save/load prompts are left blank
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    pub file: PathBuf,

    /// Load the data file before showing the menu
    #[arg(long)]
    pub load: bool,

    /// Log output format (`json` or `pretty`); filtering is set via RUST_LOG
    #[arg(long, default_value = "pretty")]
    pub log_format: LogFormat,
}
