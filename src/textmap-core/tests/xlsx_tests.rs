//! Workbook sources and full runs against real `.xlsx` files.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use textmap_core::{
    MappingRow, MemoryReporter, RowSource, RunConfig, SourceError, TextMapError, XlsxSource, run,
};

/// Writes a workbook with a single sheet holding `rows` in columns A and B.
fn write_workbook(path: &Path, sheet_name: &str, rows: &[(&str, &str)]) {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book.new_sheet(sheet_name).unwrap();
    for (index, (a, b)) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        if !a.is_empty() {
            sheet.get_cell_mut((1u32, row)).set_value(*a);
        }
        if !b.is_empty() {
            sheet.get_cell_mut((2u32, row)).set_value(*b);
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

// ============================================================================
// SOURCE TESTS
// ============================================================================

#[test]
fn test_reads_first_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.xlsx");
    write_workbook(&path, "Map", &[("cat", "dog"), ("red", "blue")]);

    let rows = XlsxSource::new(&path).read_rows().unwrap();
    assert_eq!(
        rows,
        vec![MappingRow::new("cat", "dog"), MappingRow::new("red", "blue")]
    );
}

#[test]
fn test_reads_named_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.xlsx");
    write_workbook(&path, "Glossary", &[("a", "b")]);

    let rows = XlsxSource::new(&path)
        .with_sheet("Glossary")
        .read_rows()
        .unwrap();
    assert_eq!(rows, vec![MappingRow::new("a", "b")]);
}

#[test]
fn test_unknown_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.xlsx");
    write_workbook(&path, "Map", &[("a", "b")]);

    let err = XlsxSource::new(&path)
        .with_sheet("Nope")
        .read_rows()
        .unwrap_err();
    assert!(matches!(err, SourceError::SheetNotFound(name) if name == "Nope"));
}

#[test]
fn test_blank_rows_skipped_and_missing_cells_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.xlsx");
    write_workbook(&path, "Map", &[("a", "b"), ("", ""), ("c", ""), ("", "d")]);

    let rows = XlsxSource::new(&path).read_rows().unwrap();
    assert_eq!(
        rows,
        vec![
            MappingRow::new("a", "b"),
            MappingRow::new("c", ""),
            MappingRow::new("", "d"),
        ]
    );
}

#[test]
fn test_single_column_sheet_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.xlsx");
    write_workbook(&path, "Map", &[("a", ""), ("b", "")]);

    let err = XlsxSource::new(&path).read_rows().unwrap_err();
    assert!(matches!(err, SourceError::SheetWidth { found: 1, .. }));
}

#[test]
fn test_corrupt_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.xlsx");
    fs::write(&path, "not a zip archive").unwrap();

    let err = XlsxSource::new(&path).read_rows().unwrap_err();
    assert!(matches!(err, SourceError::Xlsx(_)));
}

// ============================================================================
// RUN TESTS
// ============================================================================

#[test]
fn test_run_from_workbook() {
    let dir = tempdir().unwrap();
    let map = dir.path().join("data.xlsx");
    let text = dir.path().join("text.txt");
    write_workbook(&map, "Sheet1", &[("cat", "dog"), ("dog", "cat")]);
    fs::write(&text, "cat dog cat").unwrap();

    let reporter = MemoryReporter::new();
    let summary = run(&RunConfig::new(&map, &text), &reporter).unwrap();

    assert_eq!(fs::read_to_string(&text).unwrap(), "cat cat cat");
    assert_eq!(summary.counts["cat"], 2);
    assert_eq!(summary.counts["dog"], 3);
    assert_eq!(
        summary.total_replacements,
        summary.counts.values().sum::<usize>()
    );
}

#[test]
fn test_run_corrupt_workbook_reports_once() {
    let dir = tempdir().unwrap();
    let map = dir.path().join("data.xlsx");
    let text = dir.path().join("text.txt");
    fs::write(&map, "garbage").unwrap();
    fs::write(&text, "untouched").unwrap();

    let reporter = MemoryReporter::new();
    let err = run(&RunConfig::new(&map, &text), &reporter).unwrap_err();

    assert!(matches!(err, TextMapError::SourceRead { .. }));
    assert_eq!(reporter.error_count(), 1);
    assert_eq!(fs::read_to_string(&text).unwrap(), "untouched");
}
