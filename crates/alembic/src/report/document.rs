//! Paginated document renderer.

use chrono::Utc;

use crate::error::Result;
use crate::summary::DatasetSummary;

use super::{ReportRenderer, html_table, insight_paragraphs};

/// Rows per printed page for long tables.
const ROWS_PER_PAGE: usize = 25;

/// Renders a print-paginated report document.
///
/// Sections: dataset overview, missing values, insights, sample rows.
/// Long tables are chunked into page blocks with explicit break points;
/// pagination never drops rows.
pub struct DocumentRenderer;

impl DocumentRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for DocumentRenderer {
    fn render(&self, summary: &DatasetSummary, insights: &str) -> Result<Vec<u8>> {
        let generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let mut body = String::new();

        // 1. Dataset overview
        body.push_str("<h2>1. Dataset Overview</h2>\n");
        body.push_str(&html_table(
            &["Metric".to_string(), "Value".to_string()],
            &[
                vec!["Rows".to_string(), summary.row_count.to_string()],
                vec!["Columns".to_string(), summary.columns.len().to_string()],
            ],
        ));

        // 2. Missing values, one row per column, zeros included
        body.push_str("\n<h2>2. Missing Values</h2>\n");
        let missing_rows: Vec<Vec<String>> = summary
            .missing_values
            .iter()
            .map(|(col, count)| vec![col.clone(), count.to_string()])
            .collect();
        body.push_str(&paged_table(
            &["Column".to_string(), "Missing Count".to_string()],
            &missing_rows,
        ));

        // 3. AI insights
        body.push_str("\n<h2>3. AI Insights</h2>\n");
        for para in insight_paragraphs(insights) {
            body.push_str(&format!("<p>{}</p>\n", para));
        }

        // 4. Sample rows
        body.push_str("\n<h2>4. Sample Rows</h2>\n");
        if summary.sample_rows.is_empty() {
            body.push_str("<p class=\"muted\">No data rows available.</p>\n");
        } else {
            let sample_rows: Vec<Vec<String>> = summary
                .sample_rows
                .iter()
                .map(|row| {
                    summary
                        .columns
                        .iter()
                        .map(|col| row.get(col).map(|c| c.display()).unwrap_or_default())
                        .collect()
                })
                .collect();
            body.push_str(&paged_table(&summary.columns, &sample_rows));
        }

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Automated Insight Report</title>
<style>
{css}
</style>
</head>
<body>
<h1>Automated Insight Report</h1>
<p class="muted"><em>Generated: {generated}</em></p>
{body}
</body>
</html>
"#,
            css = DOCUMENT_CSS,
            generated = generated,
            body = body,
        );

        Ok(html.into_bytes())
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn name(&self) -> &'static str {
        "document"
    }
}

/// Chunk a long table into page blocks, repeating the header per block.
fn paged_table(headers: &[String], rows: &[Vec<String>]) -> String {
    if rows.len() <= ROWS_PER_PAGE {
        return html_table(headers, rows);
    }

    let mut out = String::new();
    for chunk in rows.chunks(ROWS_PER_PAGE) {
        out.push_str("<div class=\"page-block\">\n");
        out.push_str(&html_table(headers, chunk));
        out.push_str("\n</div>\n");
    }
    out
}

const DOCUMENT_CSS: &str = r#"body {
    font-family: Helvetica, Arial, sans-serif;
    color: #1a1a1a;
    max-width: 52rem;
    margin: 2rem auto;
    padding: 0 1rem;
    line-height: 1.5;
}
h1 { text-align: center; }
h2 { border-bottom: 1px solid #d0d0d0; padding-bottom: 0.2rem; }
table { border-collapse: collapse; margin: 0.5rem 0 1rem; }
th, td { border: 1px solid #999; padding: 0.25rem 0.6rem; text-align: left; }
th { background: #e8e8e8; }
tbody tr { background: #f5f5f5; }
.muted { color: #666; }
.page-block { break-inside: avoid; }
.page-block + .page-block { page-break-before: always; }
@media print {
    body { margin: 0; max-width: none; }
}"#;
