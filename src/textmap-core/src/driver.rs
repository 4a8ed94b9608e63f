//! One complete run: load the mapping, rewrite the text file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::error::{Result, TextMapError};
use crate::mapping::build_mapping;
use crate::replace::{ReplaceOptions, ReplacementCounts, replace_in_file};
use crate::reporter::{ReportEvent, Reporter};
use crate::source::open_source;

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub mapping_source: String,
    pub text_file: PathBuf,
    /// Distinct keys in the replacement mapping.
    pub entries: usize,
    pub counts: ReplacementCounts,
    pub total_replacements: usize,
    /// `false` for dry runs.
    pub written: bool,
}

/// Builds the mapping from `config.excel_file` and applies it to
/// `config.text_file`.
///
/// A mapping source failure aborts before the text file is opened.
pub fn run(config: &RunConfig, reporter: &dyn Reporter) -> Result<RunSummary> {
    let mapping_source = config.excel_file.display().to_string();
    reporter.report(ReportEvent::RunStarted {
        mapping_source: mapping_source.clone(),
        text_file: config.text_file.clone(),
    });

    let source = open_source(&config.excel_file, config.sheet.as_deref()).map_err(|e| {
        reporter.report(ReportEvent::error("Error reading the Excel file", &e));
        TextMapError::source_read(mapping_source.clone(), e)
    })?;
    let mapping = build_mapping(source.as_ref(), config.switch_columns, reporter)?;

    let options = ReplaceOptions::new().dry_run(config.dry_run);
    let outcome = replace_in_file(&config.text_file, &mapping, options, reporter)?;

    reporter.report(ReportEvent::Completed);

    Ok(RunSummary {
        mapping_source,
        text_file: config.text_file.clone(),
        entries: mapping.len(),
        counts: outcome.counts,
        total_replacements: outcome.total,
        written: !config.dry_run,
    })
}
