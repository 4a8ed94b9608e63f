//! Command-line parsing and dispatch.

mod args;
mod handlers;

pub use args::Cli;
pub use textmap_core::LogLevel;
pub use handlers::{DEFAULT_CONFIG_FILE, execute};
