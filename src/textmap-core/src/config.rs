//! Run configuration.
//!
//! Values come from an optional TOML file and command-line overrides, with
//! the command line taking precedence:
//!
//! ```toml
//! excel_file = "data.xlsx"
//! text_file = "text.txt"
//! switch_columns = true
//! sheet = "Glossary"
//!
//! [log]
//! file = "text_replacement.log"
//! level = "info"
//! ```
//!
//! Relative paths in a config file are taken relative to the file itself.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Log file used when none is configured.
pub const DEFAULT_LOG_FILE: &str = "text_replacement.log";

/// Log verbosity, shared by the config file and the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Accepted spellings, for error messages.
    pub const NAMES: &'static [&'static str] = &["error", "warn", "info", "debug", "trace"];

    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive, `warning` is `warn`).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| {
            format!(
                "unknown level '{}', expected one of {}",
                s,
                Self::NAMES.join("|")
            )
        })
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse TOML in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A required value was given neither in the file nor on the command line.
    #[error("Missing required setting '{0}'")]
    MissingValue(&'static str),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Contents of a TOML config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub excel_file: Option<PathBuf>,
    pub text_file: Option<PathBuf>,
    pub switch_columns: Option<bool>,
    pub sheet: Option<String>,
    pub dry_run: Option<bool>,
    #[serde(default)]
    pub log: LogConfig,
}

/// `[log]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
}

impl ConfigFile {
    /// Parses TOML content. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads a config file and anchors its relative paths to its directory.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content, path)?;

        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        for slot in [&mut self.excel_file, &mut self.text_file, &mut self.log.file] {
            if let Some(p) = slot.as_mut()
                && p.is_relative()
            {
                *p = base.join(&*p);
            }
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub excel_file: Option<PathBuf>,
    pub text_file: Option<PathBuf>,
    /// `Some` replaces the file's setting in either direction.
    pub switch_columns: Option<bool>,
    pub sheet: Option<String>,
    /// `true` forces a dry run; `false` defers to the file.
    pub dry_run: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Mapping source (workbook or delimited table).
    pub excel_file: PathBuf,
    /// Text file rewritten in place.
    pub text_file: PathBuf,
    /// Use column B as keys and column A as values.
    #[serde(default)]
    pub switch_columns: bool,
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub dry_run: bool,
}

impl RunConfig {
    pub fn new(excel_file: impl Into<PathBuf>, text_file: impl Into<PathBuf>) -> Self {
        Self {
            excel_file: excel_file.into(),
            text_file: text_file.into(),
            switch_columns: false,
            sheet: None,
            dry_run: false,
        }
    }

    pub fn switch_columns(mut self, enabled: bool) -> Self {
        self.switch_columns = enabled;
        self
    }

    pub fn sheet(mut self, name: impl Into<String>) -> Self {
        self.sheet = Some(name.into());
        self
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Merges a config file with command-line overrides.
    pub fn resolve(file: &ConfigFile, overrides: &ConfigOverrides) -> ConfigResult<Self> {
        let excel_file = overrides
            .excel_file
            .clone()
            .or_else(|| file.excel_file.clone())
            .ok_or(ConfigError::MissingValue("excel_file"))?;
        let text_file = overrides
            .text_file
            .clone()
            .or_else(|| file.text_file.clone())
            .ok_or(ConfigError::MissingValue("text_file"))?;

        Ok(Self {
            excel_file,
            text_file,
            switch_columns: overrides
                .switch_columns
                .or(file.switch_columns)
                .unwrap_or(false),
            sheet: overrides.sheet.clone().or_else(|| file.sheet.clone()),
            dry_run: overrides.dry_run || file.dry_run.unwrap_or(false),
        })
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub file: PathBuf,
    pub level: LogLevel,
}

impl LogSettings {
    pub fn resolve(file: &ConfigFile, overrides: &ConfigOverrides) -> ConfigResult<Self> {
        let level = match (overrides.log_level, file.log.level.as_deref()) {
            (Some(level), _) => level,
            (None, Some(name)) => {
                name.parse::<LogLevel>()
                    .map_err(|message| ConfigError::InvalidValue {
                        key: "log.level".to_string(),
                        message,
                    })?
            }
            (None, None) => LogLevel::default(),
        };

        Ok(Self {
            file: overrides
                .log_file
                .clone()
                .or_else(|| file.log.file.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            level,
        })
    }
}
