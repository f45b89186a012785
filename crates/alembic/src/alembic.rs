//! Main Alembic struct and public API.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{AlembicError, Result};
use crate::input::{
    DataTable, DatabaseReader, DelimitedReader, ParserConfig, SkippedStatement, SourceKind,
    SourceMetadata, SqlScriptReader, detect_source_kind,
};
use crate::llm::{InsightGenerator, LlmProvider};
use crate::report::{DocumentRenderer, ReportRenderer, SlideRenderer, write_report};
use crate::summary::{DatasetSummary, summarize};

/// Configuration for the Alembic pipeline.
#[derive(Debug, Clone, Default)]
pub struct AlembicConfig {
    /// Delimited-text parser configuration.
    pub parser: ParserConfig,
}

/// A source file loaded into the normalized representation.
#[derive(Debug)]
pub struct LoadedTable {
    /// The normalized table.
    pub table: DataTable,
    /// Source file metadata.
    pub metadata: SourceMetadata,
    /// Selected table name for SQL/database sources.
    pub table_name: Option<String>,
    /// Statements the transient engine skipped (SQL scripts only).
    pub skipped_statements: Vec<SkippedStatement>,
}

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct InsightReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The computed summary.
    pub summary: DatasetSummary,
    /// Narrative insight text (or its fallback).
    pub insights: String,
    /// Selected table name for SQL/database sources.
    pub table_name: Option<String>,
    /// Statements skipped during SQL-script replay.
    pub skipped_statements: Vec<SkippedStatement>,
    /// Paths of the written report files.
    pub report_paths: Vec<PathBuf>,
}

/// The insight pipeline: detect, read, summarize, narrate, render.
///
/// Each `run` is a strictly linear sequence owning its own table, summary
/// and (for SQL sources) transient engine; instances hold no per-run
/// state and can be shared across threads.
pub struct Alembic {
    config: AlembicConfig,
    llm_provider: Option<Arc<dyn LlmProvider>>,
    renderers: Vec<Box<dyn ReportRenderer>>,
}

impl Alembic {
    /// Create a pipeline with default configuration and both built-in
    /// renderers (document and slide deck).
    pub fn new() -> Self {
        Self::with_config(AlembicConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: AlembicConfig) -> Self {
        Self {
            config,
            llm_provider: None,
            renderers: vec![
                Box::new(DocumentRenderer::new()),
                Box::new(SlideRenderer::new()),
            ],
        }
    }

    /// Add an LLM provider for narrative insights.
    ///
    /// Without a provider, reports carry a placeholder instead of
    /// generated text.
    pub fn with_llm(mut self, provider: impl LlmProvider + 'static) -> Self {
        self.llm_provider = Some(Arc::new(provider));
        self
    }

    /// Replace the renderer set.
    pub fn with_renderers(mut self, renderers: Vec<Box<dyn ReportRenderer>>) -> Self {
        self.renderers = renderers;
        self
    }

    /// Detect the source kind and load the file into a [`LoadedTable`].
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedTable> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match detect_source_kind(&filename) {
            SourceKind::DelimitedText => {
                let reader = DelimitedReader::with_config(self.config.parser.clone());
                let (table, metadata) = reader.read_file(path)?;
                Ok(LoadedTable {
                    table,
                    metadata,
                    table_name: None,
                    skipped_statements: Vec::new(),
                })
            }
            SourceKind::SqlScript => {
                let load = SqlScriptReader::new().read_file(path)?;
                Ok(LoadedTable {
                    table: load.table,
                    metadata: load.metadata,
                    table_name: Some(load.table_name),
                    skipped_statements: load.skipped,
                })
            }
            SourceKind::Database => {
                let (table, metadata, table_name) = DatabaseReader::new().read_file(path)?;
                Ok(LoadedTable {
                    table,
                    metadata,
                    table_name: Some(table_name),
                    skipped_statements: Vec::new(),
                })
            }
            SourceKind::Unrecognized => Err(AlembicError::UnsupportedFormat(filename)),
        }
    }

    /// Load a file and compute its summary without rendering reports.
    pub fn summarize_file(&self, path: impl AsRef<Path>) -> Result<(LoadedTable, DatasetSummary)> {
        let loaded = self.load(path)?;
        let summary = summarize(&loaded.table);
        Ok((loaded, summary))
    }

    /// Run the full pipeline and write reports into `output_dir`.
    ///
    /// Report files are named after the source file's stem with each
    /// renderer's extension. Detector/reader errors abort before any
    /// report; insight failures never abort; render errors abort with
    /// no partial file left behind.
    pub fn run(&self, path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<InsightReport> {
        let path = path.as_ref();
        let output_dir = output_dir.as_ref();

        let (loaded, summary) = self.summarize_file(path)?;
        let insights = self.generate_insights(&summary);

        fs::create_dir_all(output_dir).map_err(|e| AlembicError::Io {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());

        let mut report_paths = Vec::with_capacity(self.renderers.len());
        for renderer in &self.renderers {
            let out = output_dir.join(format!("{}.{}", stem, renderer.file_extension()));
            write_report(renderer.as_ref(), &summary, &insights, &out)?;
            report_paths.push(out);
        }

        Ok(InsightReport {
            source: loaded.metadata,
            summary,
            insights,
            table_name: loaded.table_name,
            skipped_statements: loaded.skipped_statements,
            report_paths,
        })
    }

    /// Produce insight text for a summary, or the placeholder/fallback.
    fn generate_insights(&self, summary: &DatasetSummary) -> String {
        match &self.llm_provider {
            Some(provider) => InsightGenerator::new(Arc::clone(provider)).generate(summary),
            None => "Insight generation disabled: no LLM provider configured.".to_string(),
        }
    }
}

impl Default for Alembic {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockProvider;
    use std::io::Write;

    fn file_with(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_run_csv_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = file_with(&dir, "sales.csv", b"id,amount\n1,10\n2,\n");
        let out = dir.path().join("reports");

        let alembic = Alembic::new().with_llm(MockProvider::new());
        let report = alembic.run(&input, &out).unwrap();

        assert_eq!(report.summary.row_count, 2);
        assert_eq!(report.summary.missing_values["amount"], 1);
        assert_eq!(report.report_paths.len(), 2);
        for p in &report.report_paths {
            assert!(p.exists());
        }
        assert!(out.join("sales.html").exists());
        assert!(out.join("sales.slides.html").exists());
    }

    #[test]
    fn test_unrecognized_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = file_with(&dir, "notes.txt", b"hello");

        let err = Alembic::new().load(&input).unwrap_err();
        assert!(matches!(err, AlembicError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_run_without_provider_uses_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let input = file_with(&dir, "t.csv", b"x\n1\n");
        let out = dir.path().join("reports");

        let report = Alembic::new().run(&input, &out).unwrap();
        assert!(report.insights.contains("no LLM provider configured"));
    }

    #[test]
    fn test_run_with_failing_provider_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let input = file_with(&dir, "t.csv", b"x\n1\n2\n");
        let out = dir.path().join("reports");

        let alembic = Alembic::new().with_llm(MockProvider::failing("model offline"));
        let report = alembic.run(&input, &out).unwrap();

        assert!(report.insights.starts_with("Failed to generate insights:"));
        assert_eq!(report.report_paths.len(), 2);
    }

    #[test]
    fn test_run_sql_script_reports_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let input = file_with(
            &dir,
            "dump.sql",
            b"CREATE TABLE t(x INT); INSERT INTO t VALUES (1); GARBAGE STATEMENT;",
        );
        let out = dir.path().join("reports");

        let report = Alembic::new().run(&input, &out).unwrap();
        assert_eq!(report.table_name.as_deref(), Some("t"));
        assert_eq!(report.summary.row_count, 1);
        assert_eq!(report.skipped_statements.len(), 1);
    }
}
