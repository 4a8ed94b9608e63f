//! Replacement mapping construction.

use indexmap::IndexMap;

use crate::error::{Result, TextMapError};
use crate::reporter::{ReportEvent, Reporter};
use crate::source::{MappingRow, RowSource};

/// Ordered `old -> new` table. Iteration order is insertion order.
pub type ReplacementMapping = IndexMap<String, String>;

/// Builds a mapping from rows.
///
/// Each row contributes `(column_a, column_b)`, or `(column_b, column_a)` when
/// `swap` is set. Rows are inserted in order and the last row with a given key
/// wins; the key keeps the slot of its first appearance.
pub fn mapping_from_rows(
    rows: impl IntoIterator<Item = MappingRow>,
    swap: bool,
) -> ReplacementMapping {
    rows.into_iter()
        .map(|row| {
            if swap {
                (row.column_b, row.column_a)
            } else {
                (row.column_a, row.column_b)
            }
        })
        .collect()
}

/// Reads `source` and builds its replacement mapping.
///
/// Read failures are reported as an error entry and returned as
/// [`TextMapError::SourceRead`].
pub fn build_mapping(
    source: &dyn RowSource,
    swap: bool,
    reporter: &dyn Reporter,
) -> Result<ReplacementMapping> {
    let rows = source.read_rows().map_err(|e| {
        reporter.report(ReportEvent::error("Error reading the Excel file", &e));
        TextMapError::source_read(source.describe(), e)
    })?;

    // Both columns come from the same rows, so the counts always agree.
    reporter.report(ReportEvent::RowsRead {
        column_a: rows.len(),
        column_b: rows.len(),
    });

    Ok(mapping_from_rows(rows, swap))
}
