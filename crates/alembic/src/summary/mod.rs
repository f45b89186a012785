//! Deterministic statistical summary of a [`DataTable`].
//!
//! The summary is the single input to both the insight prompt and the
//! report renderers; computing it is pure and total over well-formed
//! tables, and identical tables always produce identical summaries.

mod stats;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::{Cell, DataTable};
use stats::RunningStats;

/// Number of leading rows included as a deterministic sample.
const SAMPLE_ROW_LIMIT: usize = 5;

/// Per-column statistics for uniformly numeric columns.
///
/// Field names mirror the conventional describe-table layout so the
/// serialized summary reads naturally in prompts and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Count of non-null cells.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (null when count < 2).
    pub std: Option<f64>,
    /// Minimum value.
    pub min: f64,
    /// 25th percentile (linear interpolation).
    #[serde(rename = "25%")]
    pub q1: f64,
    /// Median.
    #[serde(rename = "50%")]
    pub median: f64,
    /// 75th percentile.
    #[serde(rename = "75%")]
    pub q3: f64,
    /// Maximum value.
    pub max: f64,
}

/// Read-only statistical snapshot of a [`DataTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// Number of data rows.
    pub row_count: usize,
    /// Null-cell count per column; every column has an entry, zeros included.
    pub missing_values: IndexMap<String, usize>,
    /// Statistics for columns whose non-null cells are all numeric.
    pub numeric_summary: IndexMap<String, NumericSummary>,
    /// The first `min(5, row_count)` rows in original order.
    pub sample_rows: Vec<IndexMap<String, Cell>>,
}

impl DatasetSummary {
    /// Serialize for embedding in an insight prompt.
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compute the summary of a table.
///
/// A column is numeric only when every non-null cell is a number and at
/// least one such cell exists; mixed and all-null columns are excluded
/// from `numeric_summary` but still counted in `missing_values`.
pub fn summarize(table: &DataTable) -> DatasetSummary {
    let mut missing_values = IndexMap::with_capacity(table.column_count());
    let mut numeric_summary = IndexMap::new();

    for (index, name) in table.headers.iter().enumerate() {
        let mut null_count = 0usize;
        let mut has_text = false;
        let mut stats = RunningStats::new();

        for cell in table.column_values(index) {
            match cell {
                Cell::Null => null_count += 1,
                Cell::Number(n) => stats.add(*n),
                Cell::Text(_) => has_text = true,
            }
        }

        missing_values.insert(name.clone(), null_count);

        if !has_text && stats.count() > 0 {
            numeric_summary.insert(
                name.clone(),
                NumericSummary {
                    count: stats.count(),
                    mean: stats.mean(),
                    std: stats.std(),
                    min: stats.min(),
                    q1: stats.percentile(25.0),
                    median: stats.percentile(50.0),
                    q3: stats.percentile(75.0),
                    max: stats.max(),
                },
            );
        }
    }

    let sample_rows = table
        .rows
        .iter()
        .take(SAMPLE_ROW_LIMIT)
        .map(|row| {
            table
                .headers
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect()
        })
        .collect();

    DatasetSummary {
        columns: table.headers.clone(),
        row_count: table.row_count(),
        missing_values,
        numeric_summary,
        sample_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: Vec<Vec<Cell>>) -> DataTable {
        DataTable::new(headers.iter().map(|s| s.to_string()).collect(), rows)
    }

    #[test]
    fn test_summary_shape() {
        let t = table(
            &["id", "amount"],
            vec![
                vec![Cell::Number(1.0), Cell::Number(10.0)],
                vec![Cell::Number(2.0), Cell::Null],
            ],
        );
        let s = summarize(&t);

        assert_eq!(s.columns, vec!["id", "amount"]);
        assert_eq!(s.row_count, 2);
        assert_eq!(s.missing_values["id"], 0);
        assert_eq!(s.missing_values["amount"], 1);
        assert_eq!(s.numeric_summary["amount"].count, 1);
        assert_eq!(s.numeric_summary["amount"].std, None);
        assert_eq!(s.sample_rows.len(), 2);
    }

    #[test]
    fn test_mixed_column_excluded_from_numeric() {
        let t = table(
            &["mixed"],
            vec![
                vec![Cell::Number(1.0)],
                vec![Cell::Text("two".into())],
                vec![Cell::Number(3.0)],
            ],
        );
        let s = summarize(&t);

        assert!(!s.numeric_summary.contains_key("mixed"));
        assert_eq!(s.missing_values["mixed"], 0);
    }

    #[test]
    fn test_all_null_column_excluded_from_numeric() {
        let t = table(&["empty"], vec![vec![Cell::Null], vec![Cell::Null]]);
        let s = summarize(&t);

        assert!(!s.numeric_summary.contains_key("empty"));
        assert_eq!(s.missing_values["empty"], 2);
    }

    #[test]
    fn test_numeric_stats_ignore_nulls() {
        let t = table(
            &["v"],
            vec![
                vec![Cell::Number(1.0)],
                vec![Cell::Null],
                vec![Cell::Number(3.0)],
            ],
        );
        let s = summarize(&t);
        let v = &s.numeric_summary["v"];

        assert_eq!(v.count, 2);
        assert_eq!(v.mean, 2.0);
        assert_eq!(v.min, 1.0);
        assert_eq!(v.max, 3.0);
        assert_eq!(v.median, 2.0);
    }

    #[test]
    fn test_sample_rows_capped_at_five() {
        let rows: Vec<Vec<Cell>> = (0..8).map(|i| vec![Cell::Number(i as f64)]).collect();
        let s = summarize(&table(&["n"], rows));

        assert_eq!(s.sample_rows.len(), 5);
        assert_eq!(s.sample_rows[0]["n"], Cell::Number(0.0));
        assert_eq!(s.sample_rows[4]["n"], Cell::Number(4.0));
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let t = table(
            &["a", "b"],
            vec![
                vec![Cell::Number(1.5), Cell::Text("x".into())],
                vec![Cell::Null, Cell::Text("y".into())],
            ],
        );
        let first = summarize(&t);
        let second = summarize(&t);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_summary_serializes_describe_keys() {
        let t = table(&["x"], vec![vec![Cell::Number(1.0)], vec![Cell::Number(2.0)]]);
        let s = summarize(&t);
        let json = serde_json::to_value(&s).unwrap();

        let x = &json["numeric_summary"]["x"];
        assert!(x.get("25%").is_some());
        assert!(x.get("50%").is_some());
        assert!(x.get("75%").is_some());
        assert_eq!(x["count"], 2);
    }
}
