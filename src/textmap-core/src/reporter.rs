//! Run reporting.
//!
//! Every component receives a `&dyn Reporter` instead of writing to a global
//! logger. [`TracingReporter`] forwards events to `tracing`, so whichever
//! subscriber the caller has in scope decides where the lines end up.
//! [`MemoryReporter`] keeps the events for inspection.

use std::cell::RefCell;
use std::path::PathBuf;

use tracing::{error, info};

use crate::replace::ReplacementCounts;

/// Something worth logging during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// The driver is about to start.
    RunStarted {
        mapping_source: String,
        text_file: PathBuf,
    },
    /// Rows read from the mapping source, per column.
    RowsRead { column_a: usize, column_b: usize },
    /// One mapping entry was applied.
    Replaced {
        old: String,
        new: String,
        count: usize,
    },
    /// All entries were applied.
    Summary {
        counts: ReplacementCounts,
        total: usize,
    },
    /// The transformed buffer was written back.
    Written { path: PathBuf },
    /// Dry run: the target was left untouched.
    WriteSkipped { path: PathBuf },
    /// The driver finished.
    Completed,
    /// A failure, reported where it was detected.
    Error {
        context: &'static str,
        message: String,
    },
}

impl ReportEvent {
    pub fn error(context: &'static str, err: &impl std::fmt::Display) -> Self {
        Self::Error {
            context,
            message: err.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Sink for run events.
pub trait Reporter {
    fn report(&self, event: ReportEvent);
}

/// Emits each event as a `tracing` event under the `textmap` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: ReportEvent) {
        match event {
            ReportEvent::RunStarted {
                mapping_source,
                text_file,
            } => info!(
                target: "textmap",
                "Starting text replacement from {} in {}",
                mapping_source,
                text_file.display()
            ),
            ReportEvent::RowsRead { column_a, column_b } => {
                info!(target: "textmap", "Counts for column A: {}", column_a);
                info!(target: "textmap", "Counts for column B: {}", column_b);
            }
            ReportEvent::Replaced { old, new, count } => info!(
                target: "textmap",
                "Replaced '{}' with '{}' ({} occurrences)",
                old,
                new,
                count
            ),
            ReportEvent::Summary { counts, total } => {
                info!(target: "textmap", "Replacement counts: {:?}", counts);
                info!(target: "textmap", "Total replacements: {}", total);
            }
            ReportEvent::Written { path } => info!(
                target: "textmap",
                "Finished writing replacements to {}",
                path.display()
            ),
            ReportEvent::WriteSkipped { path } => info!(
                target: "textmap",
                "Dry run: left {} unchanged",
                path.display()
            ),
            ReportEvent::Completed => {
                info!(target: "textmap", "Text replacement process completed")
            }
            ReportEvent::Error { context, message } => {
                error!(target: "textmap", "{}: {}", context, message)
            }
        }
    }
}

/// Records events in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: RefCell<Vec<ReportEvent>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, in order.
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.borrow().clone()
    }

    pub fn error_count(&self) -> usize {
        self.events.borrow().iter().filter(|e| e.is_error()).count()
    }

    pub fn replaced(&self) -> Vec<(String, String, usize)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Replaced { old, new, count } => {
                    Some((old.clone(), new.clone(), *count))
                }
                _ => None,
            })
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: ReportEvent) {
        self.events.borrow_mut().push(event);
    }
}
