//! Run handler: resolve configuration, scope logging, run, print.

use std::path::Path;

use anyhow::{Context, Result};
use textmap_core::{ConfigFile, LogSettings, RunConfig, RunSummary, TracingReporter, run};

use super::args::Cli;
use crate::logging;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "textmap.toml";

fn load_config_file(cli: &Cli) -> Result<ConfigFile> {
    match &cli.config {
        Some(path) => Ok(ConfigFile::load(path)?),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                Ok(ConfigFile::load(default_path)?)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}

fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        let output =
            serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
        println!("{}", output);
        return Ok(());
    }

    for (old, count) in &summary.counts {
        println!("{:>8}  {}", count, old);
    }
    let verb = if summary.written {
        "written to"
    } else {
        "counted in (dry run)"
    };
    println!(
        "{} replacements from {} entries {} {}",
        summary.total_replacements,
        summary.entries,
        verb,
        summary.text_file.display()
    );
    Ok(())
}

/// Executes one replacement run.
///
/// The log subscriber only exists for the duration of the run; the log file
/// is flushed before this returns, including on failure.
pub fn execute(cli: Cli) -> Result<()> {
    let file = load_config_file(&cli)?;
    let overrides = cli.overrides();
    let config = RunConfig::resolve(&file, &overrides)?;
    let log_settings = LogSettings::resolve(&file, &overrides)?;

    let (subscriber, _log_guard) = logging::build_subscriber(&log_settings, !cli.quiet)?;
    let summary = tracing::subscriber::with_default(subscriber, || {
        run(&config, &TracingReporter)
    })?;

    print_summary(&summary, cli.json)
}
