//! Two-column mapping sources.
//!
//! A source yields headerless rows of `(column A, column B)` text. Workbooks
//! are read with `umya-spreadsheet`, delimited tables with `csv`.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SourceError;

/// One row of a mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRow {
    pub column_a: String,
    pub column_b: String,
}

impl MappingRow {
    pub fn new(column_a: impl Into<String>, column_b: impl Into<String>) -> Self {
        Self {
            column_a: column_a.into(),
            column_b: column_b.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.column_a.is_empty() && self.column_b.is_empty()
    }
}

/// Anything that can produce mapping rows.
pub trait RowSource {
    /// Human-readable name used in logs and errors.
    fn describe(&self) -> String;

    /// Reads every row, in source order.
    fn read_rows(&self) -> Result<Vec<MappingRow>, SourceError>;
}

impl RowSource for Vec<MappingRow> {
    fn describe(&self) -> String {
        "<in-memory table>".to_string()
    }

    fn read_rows(&self) -> Result<Vec<MappingRow>, SourceError> {
        Ok(self.clone())
    }
}

/// An `.xlsx` / `.xlsm` workbook.
#[derive(Debug, Clone)]
pub struct XlsxSource {
    path: PathBuf,
    /// Worksheet name; `None` reads the first sheet.
    sheet: Option<String>,
}

impl XlsxSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sheet: None,
        }
    }

    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }
}

impl RowSource for XlsxSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_rows(&self) -> Result<Vec<MappingRow>, SourceError> {
        // Surface a missing file as an I/O error rather than a parse error.
        std::fs::metadata(&self.path)?;

        let book = umya_spreadsheet::reader::xlsx::read(&self.path)
            .map_err(|e| SourceError::Xlsx(e.to_string()))?;

        let sheets = book.get_sheet_collection();
        let sheet = match &self.sheet {
            Some(name) => sheets
                .iter()
                .find(|s| s.get_name() == name.as_str())
                .ok_or_else(|| SourceError::SheetNotFound(name.clone()))?,
            None => sheets.first().ok_or(SourceError::NoWorksheets)?,
        };

        let height = sheet.get_highest_row();
        if height == 0 {
            return Ok(Vec::new());
        }

        let width = sheet.get_highest_column();
        if width != 2 {
            return Err(SourceError::SheetWidth {
                sheet: sheet.get_name().to_string(),
                found: width as usize,
            });
        }

        // Fully blank rows are dropped here, so they are not part of the
        // "Counts for column A/B" figures even when they sit inside the used range.
        let rows: Vec<MappingRow> = (1..=height)
            .map(|row| {
                MappingRow::new(sheet.get_value((1u32, row)), sheet.get_value((2u32, row)))
            })
            .filter(|row| !row.is_blank())
            .collect();

        debug!(
            "Read {} rows from worksheet '{}' of {}",
            rows.len(),
            sheet.get_name(),
            self.path.display()
        );
        Ok(rows)
    }
}

/// A headerless delimited table (`.csv`, `.tsv`).
#[derive(Debug, Clone)]
pub struct DelimitedSource {
    path: PathBuf,
    delimiter: u8,
}

impl DelimitedSource {
    pub fn csv(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn tsv(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b'\t',
        }
    }
}

impl RowSource for DelimitedSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_rows(&self) -> Result<Vec<MappingRow>, SourceError> {
        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(file);

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            if record.len() != 2 {
                return Err(SourceError::ColumnCount {
                    row: index + 1,
                    found: record.len(),
                });
            }
            rows.push(MappingRow::new(&record[0], &record[1]));
        }

        debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

/// Picks a reader for `path` by its extension.
///
/// `sheet` only applies to workbooks and is ignored for delimited tables.
pub fn open_source(path: &Path, sheet: Option<&str>) -> Result<Box<dyn RowSource>, SourceError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" => {
            let source = XlsxSource::new(path);
            Ok(Box::new(match sheet {
                Some(name) => source.with_sheet(name),
                None => source,
            }))
        }
        "csv" => Ok(Box::new(DelimitedSource::csv(path))),
        "tsv" | "tab" => Ok(Box::new(DelimitedSource::tsv(path))),
        _ => Err(SourceError::UnsupportedFormat(path.display().to_string())),
    }
}
