//! Alembic: automated insight reports for tabular datasets.
//!
//! Alembic ingests a tabular data source (CSV, SQL dump, or SQLite file),
//! distills it into a deterministic statistical summary, asks a language
//! model for narrative insights, and renders summary plus insights into
//! downloadable report documents.
//!
//! # Core Principles
//!
//! - **One normalized table**: three heterogeneous sources collapse into a
//!   single in-memory representation before anything else happens
//! - **Deterministic summaries**: identical inputs always produce
//!   bit-identical summaries, so reports are reproducible
//! - **Degrade, don't fail**: model unavailability becomes fallback text,
//!   never a failed report
//!
//! # Example
//!
//! ```no_run
//! use alembic::Alembic;
//!
//! let alembic = Alembic::new();
//! let report = alembic.run("sales.csv", "reports").unwrap();
//!
//! println!("Rows: {}", report.summary.row_count);
//! println!("Reports: {:?}", report.report_paths);
//! ```

pub mod error;
pub mod input;
pub mod llm;
pub mod report;
pub mod summary;

mod alembic;

pub use crate::alembic::{Alembic, AlembicConfig, InsightReport, LoadedTable};
pub use error::{AlembicError, Result};
pub use input::{Cell, DataTable, SourceKind, SourceMetadata, detect_source_kind};
pub use llm::{
    AnthropicProvider, InsightGenerator, LlmConfig, LlmProvider, MockProvider, OllamaProvider,
    OpenAiProvider,
};
pub use report::{DocumentRenderer, ReportRenderer, SlideRenderer};
pub use summary::{DatasetSummary, NumericSummary, summarize};
