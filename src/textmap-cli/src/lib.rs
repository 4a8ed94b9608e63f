//! Textmap CLI library module.
//!
//! - `cli/` - argument parsing and the run handler
//! - `logging` - tracing subscriber with an append-only log file

pub mod cli;
pub mod logging;
