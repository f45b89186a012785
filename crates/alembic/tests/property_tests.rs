//! Property-based tests for the Alembic core.
//!
//! These tests use proptest to generate random inputs and verify that
//! the detector and summarizer maintain their invariants under all
//! conditions.
//!
//! # Testing Philosophy
//!
//! 1. **No panics**: detection and summarization never crash on any input
//! 2. **Determinism**: same input always produces same output
//! 3. **Invariants**: summary shape properties always hold

use proptest::prelude::*;

use alembic::{Cell, DataTable, SourceKind, detect_source_kind, summarize};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary filename-like strings, including pathological ones.
fn filename_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_\\-\\.]{0,40}",
        "[a-z]{1,10}\\.(csv|sql|db|sqlite)",
        "[a-z]{1,10}\\.(CSV|SQL|DB|SQLITE|pdf|tar\\.gz)",
        // Arbitrary unicode
        ".*",
    ]
}

/// Arbitrary cells across all three variants.
fn any_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        (-1.0e6f64..1.0e6).prop_map(Cell::Number),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Cell::Text),
        Just(Cell::Null),
    ]
}

/// A table with 1-6 columns and 0-30 rows of arbitrary cells.
fn any_table() -> impl Strategy<Value = DataTable> {
    (1usize..=6, 0usize..=30).prop_flat_map(|(cols, rows)| {
        let headers: Vec<String> = (0..cols).map(|i| format!("col_{}", i)).collect();
        prop::collection::vec(
            prop::collection::vec(any_cell(), cols..=cols),
            rows..=rows,
        )
        .prop_map(move |rows| DataTable::new(headers.clone(), rows))
    })
}

// =============================================================================
// Format Detector Properties
// =============================================================================

proptest! {
    /// The detector is total: any string maps to exactly one kind.
    #[test]
    fn detector_never_panics(name in filename_like()) {
        let kind = detect_source_kind(&name);
        prop_assert!(matches!(
            kind,
            SourceKind::DelimitedText
                | SourceKind::SqlScript
                | SourceKind::Database
                | SourceKind::Unrecognized
        ));
    }

    /// Detection is case-insensitive on the extension.
    #[test]
    fn detector_ignores_extension_case(stem in "[a-z]{1,10}", ext in "(csv|sql|db|sqlite)") {
        let lower = detect_source_kind(&format!("{}.{}", stem, ext));
        let upper = detect_source_kind(&format!("{}.{}", stem, ext.to_uppercase()));
        prop_assert_eq!(lower, upper);
    }
}

// =============================================================================
// Summarizer Properties
// =============================================================================

proptest! {
    /// Row count is exact and the sample is a bounded head.
    #[test]
    fn summary_row_count_and_sample(table in any_table()) {
        let summary = summarize(&table);
        prop_assert_eq!(summary.row_count, table.row_count());
        prop_assert_eq!(summary.sample_rows.len(), table.row_count().min(5));
    }

    /// missing_values has exactly one entry per column, no extras.
    #[test]
    fn summary_missing_values_exact_keys(table in any_table()) {
        let summary = summarize(&table);
        prop_assert_eq!(summary.missing_values.len(), table.column_count());
        for name in &table.headers {
            prop_assert!(summary.missing_values.contains_key(name));
        }
    }

    /// numeric_summary keys are a subset of columns, and any column with
    /// a text cell is excluded.
    #[test]
    fn summary_numeric_subset(table in any_table()) {
        let summary = summarize(&table);
        for name in summary.numeric_summary.keys() {
            prop_assert!(table.headers.contains(name));

            let index = table.headers.iter().position(|h| h == name).unwrap();
            let has_text = table
                .column_values(index)
                .any(|c| matches!(c, Cell::Text(_)));
            prop_assert!(!has_text);
        }
    }

    /// Numeric counts plus nulls never exceed the row count, and stats
    /// are internally ordered.
    #[test]
    fn summary_numeric_stats_consistent(table in any_table()) {
        let summary = summarize(&table);
        for (name, stats) in &summary.numeric_summary {
            let nulls = summary.missing_values[name];
            prop_assert_eq!(stats.count + nulls, summary.row_count);
            prop_assert!(stats.min <= stats.q1);
            prop_assert!(stats.q1 <= stats.median);
            prop_assert!(stats.median <= stats.q3);
            prop_assert!(stats.q3 <= stats.max);
            // Allow a little float slack around the running mean
            let slack = 1e-9 * stats.max.abs().max(stats.min.abs()).max(1.0);
            prop_assert!(stats.mean >= stats.min - slack);
            prop_assert!(stats.mean <= stats.max + slack);
        }
    }

    /// Summarization is idempotent down to the serialized bytes.
    #[test]
    fn summary_idempotent(table in any_table()) {
        let first = summarize(&table);
        let second = summarize(&table);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
