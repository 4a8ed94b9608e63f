//! Sequential literal replacement.
//!
//! Entries are applied one after another against the current buffer, so a
//! later key sees text produced (or consumed) by earlier ones.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TextMapError};
use crate::mapping::ReplacementMapping;
use crate::reporter::{ReportEvent, Reporter};

/// Occurrences found per key, in mapping order.
pub type ReplacementCounts = IndexMap<String, usize>;

/// Result of a replacement pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceOutcome {
    /// Buffer after every entry was applied.
    pub content: String,
    pub counts: ReplacementCounts,
    /// Sum of `counts`.
    pub total: usize,
}

/// Options for [`replace_in_file`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReplaceOptions {
    /// Count replacements but leave the file untouched.
    #[serde(default)]
    pub dry_run: bool,
}

impl ReplaceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }
}

/// Replaces every non-overlapping occurrence of `old` with `new`.
///
/// An empty `old` matches nothing.
fn replace_literal(content: &str, old: &str, new: &str) -> Option<(String, usize)> {
    if old.is_empty() {
        return None;
    }
    let count = content.matches(old).count();
    if count == 0 {
        return None;
    }
    Some((content.replace(old, new), count))
}

/// Applies `mapping` to `buffer` in insertion order, reporting each entry.
fn apply_in_order(
    buffer: &str,
    mapping: &ReplacementMapping,
    reporter: &dyn Reporter,
) -> ReplaceOutcome {
    let mut content = buffer.to_string();
    let mut counts = ReplacementCounts::with_capacity(mapping.len());

    for (old, new) in mapping {
        let count = match replace_literal(&content, old, new) {
            Some((replaced, count)) => {
                content = replaced;
                count
            }
            None => 0,
        };

        reporter.report(ReportEvent::Replaced {
            old: old.clone(),
            new: new.clone(),
            count,
        });
        counts.insert(old.clone(), count);
    }

    let total = counts.values().sum();
    ReplaceOutcome {
        content,
        counts,
        total,
    }
}

fn report_summary(outcome: &ReplaceOutcome, reporter: &dyn Reporter) {
    reporter.report(ReportEvent::Summary {
        counts: outcome.counts.clone(),
        total: outcome.total,
    });
}

/// Applies `mapping` to `buffer` in insertion order.
///
/// The counts table and total are reported once every entry has been applied.
pub fn apply_replacements(
    buffer: &str,
    mapping: &ReplacementMapping,
    reporter: &dyn Reporter,
) -> ReplaceOutcome {
    let outcome = apply_in_order(buffer, mapping, reporter);
    report_summary(&outcome, reporter);
    outcome
}

/// Reads `path`, applies `mapping` and writes the result back in place.
///
/// The whole file is held in memory. Nothing is backed up and a failed write
/// is not rolled back. The counts table and total are reported after the
/// write-back line, and not at all when the write fails.
pub fn replace_in_file(
    path: &Path,
    mapping: &ReplacementMapping,
    options: ReplaceOptions,
    reporter: &dyn Reporter,
) -> Result<ReplaceOutcome> {
    let content = fs::read_to_string(path).map_err(|e| {
        reporter.report(ReportEvent::error("Error reading the text file", &e));
        TextMapError::target_read(path, e)
    })?;
    debug!("Loaded {} bytes from {}", content.len(), path.display());

    let outcome = apply_in_order(&content, mapping, reporter);

    if options.dry_run {
        reporter.report(ReportEvent::WriteSkipped {
            path: path.to_path_buf(),
        });
        report_summary(&outcome, reporter);
        return Ok(outcome);
    }

    fs::write(path, &outcome.content).map_err(|e| {
        reporter.report(ReportEvent::error("Error writing to the text file", &e));
        TextMapError::target_write(path, e)
    })?;
    reporter.report(ReportEvent::Written {
        path: path.to_path_buf(),
    });
    report_summary(&outcome, reporter);

    Ok(outcome)
}
