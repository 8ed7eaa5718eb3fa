//! Command-line argument parsing
//!
//! Supports:
//! - Opening one data file
//! - Overriding the grid page size
//! - Reading editor commands from a script file instead of stdin

use clap::Parser;
use std::path::PathBuf;

/// Open a data file and edit its records from a command prompt
#[derive(Parser, Debug)]
#[command(
    name = "recordpad",
    version,
    about = "Edit CSV, JSON-lines, Parquet and workbook records"
)]
pub struct CliArgs {
    /// File to open
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Rows per grid page (overrides the config file)
    #[arg(long, value_name = "N")]
    pub rows_per_page: Option<usize>,

    /// Read commands from this file instead of stdin
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Keep the clipboard inside the process instead of using the system clipboard
    #[arg(long)]
    pub no_system_clipboard: bool,
}

/// Where commands come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSource {
    Stdin,
    Script(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub path: PathBuf,
    pub rows_per_page: Option<usize>,
    pub source: CommandSource,
    pub system_clipboard: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if self.rows_per_page == Some(0) {
            return Err("--rows-per-page must be at least 1".to_string());
        }

        let source = match self.script {
            Some(script) => CommandSource::Script(script),
            None => CommandSource::Stdin,
        };

        Ok(StartupConfig {
            path: self.path,
            rows_per_page: self.rows_per_page,
            source,
            system_clipboard: !self.no_system_clipboard,
        })
    }
}
