//! Tests for the sequential replacement pass.

use pretty_assertions::assert_eq;

use crate::mapping::{ReplacementMapping, mapping_from_rows};
use crate::replace::*;
use crate::reporter::MemoryReporter;
use crate::source::MappingRow;

fn ordered(pairs: &[(&str, &str)]) -> ReplacementMapping {
    mapping_from_rows(pairs.iter().map(|(a, b)| MappingRow::new(*a, *b)), false)
}

fn apply(buffer: &str, pairs: &[(&str, &str)]) -> ReplaceOutcome {
    apply_replacements(buffer, &ordered(pairs), &MemoryReporter::new())
}

#[test]
fn test_cat_dog_round_trip() {
    let reporter = MemoryReporter::new();
    let outcome = apply_replacements(
        "cat dog cat",
        &ordered(&[("cat", "dog"), ("dog", "cat")]),
        &reporter,
    );

    assert_eq!(outcome.content, "cat cat cat");
    assert_eq!(outcome.counts["cat"], 2);
    // The original "dog" plus the two produced by the first step.
    assert_eq!(outcome.counts["dog"], 3);
    assert_eq!(outcome.total, 5);
    assert_eq!(
        reporter.replaced(),
        vec![
            ("cat".to_string(), "dog".to_string(), 2),
            ("dog".to_string(), "cat".to_string(), 3),
        ]
    );
}

#[test]
fn test_later_key_sees_earlier_output() {
    // key2's replacement introduces key1; key1 runs afterwards and counts it.
    let outcome = apply("b", &[("b", "a a"), ("a", "z")]);
    assert_eq!(outcome.counts["a"], 2);
    assert_eq!(outcome.content, "z z");
}

#[test]
fn test_earlier_key_unaffected_by_later_output() {
    // key1 runs first, so occurrences introduced by key2 are never counted.
    let outcome = apply("b", &[("a", "z"), ("b", "a a")]);
    assert_eq!(outcome.counts["a"], 0);
    assert_eq!(outcome.content, "a a");
}

#[test]
fn test_earlier_key_consumes_later_matches() {
    let outcome = apply("foobar", &[("foo", "x"), ("oba", "y")]);
    assert_eq!(outcome.content, "xbar");
    assert_eq!(outcome.counts["oba"], 0);
}

#[test]
fn test_second_pass_differs_when_values_feed_keys() {
    let pairs = [("a", "b"), ("c", "a")];
    let first = apply("ac", &pairs);
    assert_eq!(first.content, "ba");

    let second = apply(&first.content, &pairs);
    assert_eq!(second.content, "bb");
    assert_ne!(first.content, second.content);
}

#[test]
fn test_total_is_sum_of_counts() {
    let buffers = ["", "aaa", "ab ba ab", "the cat sat on the mat"];
    let pairs = [("a", "aa"), ("b", ""), ("at", "og"), ("", "x"), ("the", "a")];

    for buffer in buffers {
        let outcome = apply(buffer, &pairs);
        assert_eq!(outcome.total, outcome.counts.values().sum::<usize>());
        assert_eq!(outcome.counts.len(), pairs.len());
    }
}

#[test]
fn test_empty_mapping_leaves_buffer() {
    let outcome = apply("unchanged text", &[]);
    assert_eq!(outcome.content, "unchanged text");
    assert!(outcome.counts.is_empty());
    assert_eq!(outcome.total, 0);
}

#[test]
fn test_swapped_numbers() {
    let rows = vec![MappingRow::new("x", "1"), MappingRow::new("y", "2")];
    let mapping = mapping_from_rows(rows, true);
    let outcome = apply_replacements("1 2", &mapping, &MemoryReporter::new());
    assert_eq!(outcome.content, "x y");
    assert_eq!(outcome.total, 2);
}

#[test]
fn test_multibyte_text() {
    let outcome = apply("naïve café", &[("é", "e"), ("ï", "i")]);
    assert_eq!(outcome.content, "naive cafe");
    assert_eq!(outcome.total, 2);
}
