//! File-type detection by extension.

use serde::{Deserialize, Serialize};

/// Classification of an input file's format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Delimited text with a header row (`.csv`).
    DelimitedText,
    /// A dump of SQL statements to replay (`.sql`).
    SqlScript,
    /// A SQLite database file (`.db`, `.sqlite`).
    Database,
    /// Anything else, including filenames without an extension.
    Unrecognized,
}

impl SourceKind {
    /// Short label used in metadata and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::DelimitedText => "csv",
            SourceKind::SqlScript => "sql",
            SourceKind::Database => "db",
            SourceKind::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a filename to its source kind by extension, case-insensitively.
///
/// Total over all strings: unknown extensions, empty input and dotless
/// names all yield [`SourceKind::Unrecognized`] rather than an error.
pub fn detect_source_kind(filename: &str) -> SourceKind {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return SourceKind::Unrecognized;
    };

    match ext.to_ascii_lowercase().as_str() {
        "csv" => SourceKind::DelimitedText,
        "sql" => SourceKind::SqlScript,
        "db" | "sqlite" => SourceKind::Database,
        _ => SourceKind::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_extensions() {
        assert_eq!(detect_source_kind("sales.csv"), SourceKind::DelimitedText);
        assert_eq!(detect_source_kind("dump.sql"), SourceKind::SqlScript);
        assert_eq!(detect_source_kind("app.db"), SourceKind::Database);
        assert_eq!(detect_source_kind("app.sqlite"), SourceKind::Database);
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(detect_source_kind("SALES.CSV"), SourceKind::DelimitedText);
        assert_eq!(detect_source_kind("Dump.SQL"), SourceKind::SqlScript);
        assert_eq!(detect_source_kind("App.SqLiTe"), SourceKind::Database);
    }

    #[test]
    fn test_detect_unrecognized() {
        assert_eq!(detect_source_kind("report.pdf"), SourceKind::Unrecognized);
        assert_eq!(detect_source_kind("noextension"), SourceKind::Unrecognized);
        assert_eq!(detect_source_kind(""), SourceKind::Unrecognized);
        assert_eq!(detect_source_kind("trailingdot."), SourceKind::Unrecognized);
    }

    #[test]
    fn test_detect_uses_final_extension() {
        assert_eq!(detect_source_kind("backup.sql.csv"), SourceKind::DelimitedText);
        assert_eq!(detect_source_kind("data.csv.gz"), SourceKind::Unrecognized);
    }
}
