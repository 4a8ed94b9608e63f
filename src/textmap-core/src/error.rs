//! Error types for mapping and replacement runs.

use std::path::PathBuf;

/// Result type alias for textmap operations.
pub type Result<T> = std::result::Result<T, TextMapError>;

/// Errors that abort a replacement run.
#[derive(Debug, thiserror::Error)]
pub enum TextMapError {
    /// The mapping source could not be opened or parsed.
    #[error("Failed to read mapping source '{source_name}': {source}")]
    SourceRead {
        source_name: String,
        #[source]
        source: SourceError,
    },

    /// The text target could not be read.
    #[error("Failed to read text file '{path}': {source}")]
    TargetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text target could not be written back.
    #[error("Failed to write text file '{path}': {source}")]
    TargetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TextMapError {
    /// Creates a new `SourceRead` error.
    pub fn source_read(source_name: impl Into<String>, source: SourceError) -> Self {
        Self::SourceRead {
            source_name: source_name.into(),
            source,
        }
    }

    /// Creates a new `TargetRead` error.
    pub fn target_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::TargetRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new `TargetWrite` error.
    pub fn target_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::TargetWrite {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while reading rows out of a mapping source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error while opening the source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook could not be parsed.
    #[error("Invalid workbook: {0}")]
    Xlsx(String),

    /// The delimited table could not be parsed.
    #[error("Invalid delimited table: {0}")]
    Csv(#[from] csv::Error),

    /// The requested worksheet is not in the workbook.
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// The workbook has no worksheets at all.
    #[error("Workbook contains no worksheets")]
    NoWorksheets,

    /// The worksheet's used range is not exactly two columns wide.
    #[error("Expected 2 columns in worksheet '{sheet}', found {found}")]
    SheetWidth { sheet: String, found: usize },

    /// A row is not exactly two columns wide.
    #[error("Expected 2 columns, found {found} (row {row})")]
    ColumnCount { row: usize, found: usize },

    /// The file extension does not name a supported table format.
    #[error("Unsupported mapping source format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextMapError::source_read("data.xlsx", SourceError::SheetNotFound("Map".into()));
        let msg = err.to_string();
        assert!(msg.contains("data.xlsx"));
        assert!(msg.contains("Map"));

        let err = SourceError::ColumnCount { row: 3, found: 1 };
        assert_eq!(err.to_string(), "Expected 2 columns, found 1 (row 3)");
    }

    #[test]
    fn test_error_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = TextMapError::target_write("/tmp/out.txt", io_err);
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("denied"));
    }

    #[test]
    fn test_source_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: SourceError = io_err.into();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
