//! CLI argument structures and parsing.

use std::path::PathBuf;

use clap::Parser;
use textmap_core::{ConfigOverrides, LogLevel};

/// Textmap - replace text in a file using a two-column mapping table
///
/// Every value in column A of the mapping table is replaced by the value in
/// column B of the same row, in table order. The text file is overwritten.
#[derive(Parser, Debug)]
#[command(name = "textmap")]
#[command(author, version)]
#[command(about = "Replace text in a file using a two-column mapping table")]
pub struct Cli {
    /// Mapping table (.xlsx, .xlsm, .csv or .tsv) without a header row
    #[arg(value_name = "EXCEL_FILE")]
    pub excel_file: Option<PathBuf>,

    /// Text file to rewrite in place
    #[arg(value_name = "TEXT_FILE")]
    pub text_file: Option<PathBuf>,

    /// TOML config file (defaults to ./textmap.toml when present)
    #[arg(long, short = 'c', value_name = "FILE", env = "TEXTMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use column B as the text to find and column A as its replacement
    #[arg(long = "switch-columns", short = 's', overrides_with = "no_switch_columns")]
    pub switch_columns: bool,

    /// Keep column A as the text to find, even if the config file switches
    #[arg(long = "no-switch-columns", overrides_with = "switch_columns")]
    pub no_switch_columns: bool,

    /// Worksheet to read (defaults to the first sheet)
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,

    /// Count replacements without writing the text file
    #[arg(long = "dry-run", short = 'n')]
    pub dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Log file, appended to on every run
    #[arg(long = "log-file", value_name = "FILE", help_heading = "Logging")]
    pub log_file: Option<PathBuf>,

    /// Log verbosity: error, warn, info, debug or trace
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        value_parser = parse_log_level,
        env = "TEXTMAP_LOG_LEVEL",
        help_heading = "Logging"
    )]
    pub log_level: Option<LogLevel>,

    /// Do not mirror log lines to stderr
    #[arg(long, short = 'q', help_heading = "Logging")]
    pub quiet: bool,
}

/// Same spelling rules as `[log] level` in a config file.
fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

impl Cli {
    /// Settings given on the command line, to be layered over the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            excel_file: self.excel_file.clone(),
            text_file: self.text_file.clone(),
            switch_columns: if self.no_switch_columns {
                Some(false)
            } else if self.switch_columns {
                Some(true)
            } else {
                None
            },
            sheet: self.sheet.clone(),
            dry_run: self.dry_run,
            log_file: self.log_file.clone(),
            log_level: self.log_level,
        }
    }
}
