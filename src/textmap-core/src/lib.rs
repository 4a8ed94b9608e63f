//! Textmap core - mapping tables and literal text replacement.
//!
//! Provides:
//! - Mapping sources (xlsx workbooks, csv/tsv tables, in-memory rows)
//! - Ordered replacement mapping construction with optional column swap
//! - Sequential literal replacement with per-key occurrence counts
//! - A driver that ties both together for a single text file
//!
//! Logging goes through an injected [`Reporter`] rather than global state.
//!
//! # Example
//!
//! ```no_run
//! use textmap_core::{RunConfig, TracingReporter, run};
//!
//! let config = RunConfig::new("data.xlsx", "text.txt").switch_columns(true);
//! let summary = run(&config, &TracingReporter)?;
//! println!("{} replacements", summary.total_replacements);
//! # Ok::<(), textmap_core::TextMapError>(())
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod mapping;
pub mod replace;
pub mod reporter;
pub mod source;

#[cfg(test)]
mod tests;

pub use config::{
    ConfigError, ConfigFile, ConfigOverrides, ConfigResult, LogConfig, LogLevel, LogSettings,
    RunConfig,
};
pub use driver::{RunSummary, run};
pub use error::{Result, SourceError, TextMapError};
pub use mapping::{ReplacementMapping, build_mapping, mapping_from_rows};
pub use replace::{
    ReplaceOptions, ReplaceOutcome, ReplacementCounts, apply_replacements, replace_in_file,
};
pub use reporter::{MemoryReporter, ReportEvent, Reporter, TracingReporter};
pub use source::{DelimitedSource, MappingRow, RowSource, XlsxSource, open_source};
