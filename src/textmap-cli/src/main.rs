//! Textmap CLI - Main entry point.
//!
//! Loads a two-column mapping table and rewrites a text file in place,
//! replacing every column-A value with its column-B value.

use anyhow::Result;
use clap::Parser;

use textmap_cli::cli::{Cli, execute};

fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}
