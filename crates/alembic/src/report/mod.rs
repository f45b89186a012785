//! Report rendering: summary + insight text to downloadable files.
//!
//! Renderers are pure with respect to their inputs: (summary, insights)
//! in, file bytes out. Uses embedded templates with simple string
//! interpolation for a lightweight approach that doesn't require external
//! template dependencies.

mod document;
mod slides;

use std::fs;
use std::path::Path;

use crate::error::{AlembicError, Result};
use crate::summary::DatasetSummary;

pub use document::DocumentRenderer;
pub use slides::SlideRenderer;

/// Trait for report renderers.
///
/// Implementations lay out the same required content — dataset overview,
/// missing-values table, insight text, sample rows — and paginate
/// internally without dropping data.
pub trait ReportRenderer: Send + Sync {
    /// Produce the serialized report.
    fn render(&self, summary: &DatasetSummary, insights: &str) -> Result<Vec<u8>>;

    /// File extension for this renderer's output (without leading dot).
    fn file_extension(&self) -> &'static str;

    /// Get the name of this renderer (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Render and write a report to `path`.
///
/// Bytes are written to a temporary sibling and renamed into place, so a
/// failed write never leaves a partial file at the destination.
pub fn write_report(
    renderer: &dyn ReportRenderer,
    summary: &DatasetSummary,
    insights: &str,
    path: &Path,
) -> Result<()> {
    let bytes = renderer.render(summary, insights)?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &bytes).map_err(|e| AlembicError::Render {
        path: path.to_path_buf(),
        message: format!("failed to write report: {}", e),
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        AlembicError::Render {
            path: path.to_path_buf(),
            message: format!("failed to finalize report: {}", e),
        }
    })?;

    Ok(())
}

/// Escape text for HTML element content and attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Split insight text into paragraphs, preserving single line breaks
/// inside a paragraph as `<br>`.
pub(crate) fn insight_paragraphs(insights: &str) -> Vec<String> {
    insights
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.lines()
                .map(|line| escape_html(line.trim_end()))
                .collect::<Vec<_>>()
                .join("<br>")
        })
        .collect()
}

/// Render one HTML table with a header row and escaped body cells.
pub(crate) fn html_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for h in headers {
        out.push_str(&format!("<th>{}</th>", escape_html(h)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}
