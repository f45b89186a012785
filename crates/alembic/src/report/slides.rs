//! Slide-deck renderer.

use chrono::Utc;

use crate::error::Result;
use crate::summary::DatasetSummary;

use super::{ReportRenderer, escape_html, html_table, insight_paragraphs};

/// Missing-value rows per slide.
const MISSING_ROWS_PER_SLIDE: usize = 10;

/// Insight paragraphs per slide.
const PARAGRAPHS_PER_SLIDE: usize = 3;

/// Renders the report as a self-contained slide deck.
///
/// One slide per content block: title, overview, missing values (chunked),
/// insights (chunked), sample rows. Chunking never drops data.
pub struct SlideRenderer;

impl SlideRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SlideRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for SlideRenderer {
    fn render(&self, summary: &DatasetSummary, insights: &str) -> Result<Vec<u8>> {
        let generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let mut slides = Vec::new();

        // Title slide
        slides.push(format!(
            "<h1>Automated Insight Report</h1>\n<p class=\"muted\">Generated: {}</p>",
            generated
        ));

        // Overview slide
        slides.push(format!(
            "<h2>Dataset Overview</h2>\n{}",
            html_table(
                &["Metric".to_string(), "Value".to_string()],
                &[
                    vec!["Rows".to_string(), summary.row_count.to_string()],
                    vec!["Columns".to_string(), summary.columns.len().to_string()],
                ],
            )
        ));

        // Missing values, chunked across slides
        let missing_rows: Vec<Vec<String>> = summary
            .missing_values
            .iter()
            .map(|(col, count)| vec![col.clone(), count.to_string()])
            .collect();
        let missing_slides = missing_rows.chunks(MISSING_ROWS_PER_SLIDE).count();
        for (i, chunk) in missing_rows.chunks(MISSING_ROWS_PER_SLIDE).enumerate() {
            let title = if missing_slides > 1 {
                format!("Missing Values ({}/{})", i + 1, missing_slides)
            } else {
                "Missing Values".to_string()
            };
            slides.push(format!(
                "<h2>{}</h2>\n{}",
                escape_html(&title),
                html_table(
                    &["Column".to_string(), "Missing Count".to_string()],
                    chunk,
                )
            ));
        }

        // Insights, a few paragraphs per slide
        let paragraphs = insight_paragraphs(insights);
        if paragraphs.is_empty() {
            slides.push("<h2>AI Insights</h2>\n<p class=\"muted\">No insight text.</p>".to_string());
        } else {
            let insight_slides = paragraphs.chunks(PARAGRAPHS_PER_SLIDE).count();
            for (i, chunk) in paragraphs.chunks(PARAGRAPHS_PER_SLIDE).enumerate() {
                let title = if insight_slides > 1 {
                    format!("AI Insights ({}/{})", i + 1, insight_slides)
                } else {
                    "AI Insights".to_string()
                };
                let body: String = chunk
                    .iter()
                    .map(|p| format!("<p>{}</p>\n", p))
                    .collect();
                slides.push(format!("<h2>{}</h2>\n{}", escape_html(&title), body));
            }
        }

        // Sample rows slide
        if !summary.sample_rows.is_empty() {
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
            slides.push(format!(
                "<h2>Sample Rows</h2>\n{}",
                html_table(&summary.columns, &sample_rows)
            ));
        }

        let slide_markup: String = slides
            .into_iter()
            .map(|content| format!("<section class=\"slide\">\n{}\n</section>\n", content))
            .collect();

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Automated Insight Report - Slides</title>
<style>
{css}
</style>
</head>
<body>
{slides}
</body>
</html>
"#,
            css = SLIDES_CSS,
            slides = slide_markup,
        );

        Ok(html.into_bytes())
    }

    fn file_extension(&self) -> &'static str {
        "slides.html"
    }

    fn name(&self) -> &'static str {
        "slides"
    }
}

const SLIDES_CSS: &str = r#"body {
    font-family: Helvetica, Arial, sans-serif;
    background: #222;
    margin: 0;
}
.slide {
    box-sizing: border-box;
    min-height: 100vh;
    padding: 3rem 4rem;
    background: #fff;
    color: #1a1a1a;
    border-bottom: 4px solid #222;
    page-break-after: always;
}
.slide h1 { font-size: 2.4rem; margin-top: 30vh; text-align: center; }
.slide h2 { font-size: 1.8rem; border-bottom: 2px solid #d0d0d0; padding-bottom: 0.3rem; }
table { border-collapse: collapse; margin-top: 1rem; font-size: 1.1rem; }
th, td { border: 1px solid #999; padding: 0.3rem 0.8rem; text-align: left; }
th { background: #e8e8e8; }
.muted { color: #666; text-align: center; }"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Cell, DataTable};
    use crate::summary::summarize;

    fn render_to_string(summary: &DatasetSummary, insights: &str) -> String {
        let bytes = SlideRenderer::new().render(summary, insights).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    fn wide_summary(columns: usize) -> DatasetSummary {
        let headers: Vec<String> = (0..columns).map(|i| format!("col{}", i)).collect();
        let row: Vec<Cell> = (0..columns).map(|i| Cell::Number(i as f64)).collect();
        summarize(&DataTable::new(headers, vec![row]))
    }

    #[test]
    fn test_deck_has_core_slides() {
        let html = render_to_string(&wide_summary(3), "An insight.");

        assert!(html.contains("Automated Insight Report"));
        assert!(html.contains("Dataset Overview"));
        assert!(html.contains("Missing Values"));
        assert!(html.contains("AI Insights"));
        assert!(html.contains("Sample Rows"));
    }

    #[test]
    fn test_missing_values_chunked_without_loss() {
        let html = render_to_string(&wide_summary(23), "");

        // 23 columns at 10 rows per slide = 3 slides
        assert!(html.contains("Missing Values (1/3)"));
        assert!(html.contains("Missing Values (3/3)"));
        for i in 0..23 {
            assert!(html.contains(&format!("<td>col{}</td>", i)));
        }
    }

    #[test]
    fn test_long_insights_split_across_slides() {
        let insights = (0..7)
            .map(|i| format!("Paragraph number {}.", i))
            .collect::<Vec<_>>()
            .join("\n\n");
        let html = render_to_string(&wide_summary(2), &insights);

        assert!(html.contains("AI Insights (1/3)"));
        assert!(html.contains("Paragraph number 6."));
    }
}
