//! Log subscriber for a single run.
//!
//! Lines go to an append-only log file through a non-blocking writer and,
//! unless disabled, to stderr. The subscriber is returned rather than
//! installed globally; callers scope it with
//! [`tracing::subscriber::with_default`].

use std::fs::{self, OpenOptions};

use anyhow::{Context, Result};
use textmap_core::{LogLevel, LogSettings};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

/// Guard that ensures the log file is flushed when dropped.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Filter for our own crates at `level`, everything else at `warn`.
///
/// `RUST_LOG` takes precedence when set.
fn build_filter(level: LogLevel) -> EnvFilter {
    let level = level.as_filter_str();
    if std::env::var("RUST_LOG").is_ok()
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(format!(
        "warn,textmap={level},textmap_core={level},textmap_cli={level}"
    ))
}

/// Builds the run subscriber and opens (or creates) the log file.
pub fn build_subscriber(
    settings: &LogSettings,
    mirror_stderr: bool,
) -> Result<(impl Subscriber + Send + Sync + 'static, LogGuard)> {
    if let Some(parent) = settings.file.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create log directory {}", parent.display())
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.file)
        .with_context(|| format!("Failed to open log file {}", settings.file.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false);

    let stderr_layer = mirror_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
    });

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(settings.level))
        .with(file_layer)
        .with(stderr_layer);

    Ok((subscriber, LogGuard { _guard: guard }))
}
