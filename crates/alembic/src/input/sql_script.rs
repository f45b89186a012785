//! SQL-script reader: replays a dump against a transient in-memory engine.

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use sha2::{Digest, Sha256};

use super::database::{first_table_name, load_table};
use super::detect::SourceKind;
use super::source::{DataTable, SourceMetadata};
use crate::error::{AlembicError, Result};

/// A statement the transient engine refused to execute.
///
/// Dumps often target another SQL dialect, so failed statements are skipped
/// rather than aborting the run. The skip list is returned so callers can
/// inspect what was dropped instead of losing it silently.
#[derive(Debug, Clone)]
pub struct SkippedStatement {
    /// Position of the statement in the script (0-based).
    pub index: usize,
    /// The statement text as split from the script.
    pub statement: String,
    /// The engine error that caused the skip.
    pub error: String,
}

/// Result of replaying a SQL script.
#[derive(Debug)]
pub struct SqlScriptLoad {
    /// Rows of the first table created by the script.
    pub table: DataTable,
    /// Name of the selected table.
    pub table_name: String,
    /// Source file metadata.
    pub metadata: SourceMetadata,
    /// Statements the engine rejected, in script order.
    pub skipped: Vec<SkippedStatement>,
}

/// Reads a SQL dump by executing it against a fresh in-memory SQLite
/// engine and loading the first table it creates.
///
/// The engine lives only for the duration of [`read_file`] and is dropped
/// on every exit path, including failures.
///
/// [`read_file`]: SqlScriptReader::read_file
pub struct SqlScriptReader;

impl SqlScriptReader {
    pub fn new() -> Self {
        Self
    }

    /// Replay the script at `path` and load the first resulting table.
    ///
    /// Statements are executed in order; failures are collected, not fatal.
    /// Fails with [`AlembicError::NoTable`] when no statement produced a
    /// table. "First" means catalog creation order (`sqlite_master` rowid).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<SqlScriptLoad> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| AlembicError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let script = String::from_utf8_lossy(&contents);
        let conn = Connection::open_in_memory()?;
        let skipped = replay_statements(&conn, &script);

        let table_name = first_table_name(&conn)?.ok_or_else(|| {
            AlembicError::NoTable(format!("no tables created by '{}'", path.display()))
        })?;
        let table = load_table(&conn, &table_name)?;

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            SourceKind::SqlScript,
            table.row_count(),
            table.column_count(),
        );

        Ok(SqlScriptLoad {
            table,
            table_name,
            metadata,
            skipped,
        })
    }
}

impl Default for SqlScriptReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute each statement in order, folding engine state and a skip list.
fn replay_statements(conn: &Connection, script: &str) -> Vec<SkippedStatement> {
    let mut skipped = Vec::new();

    for (index, statement) in split_statements(script).into_iter().enumerate() {
        if let Err(e) = conn.execute_batch(&statement) {
            skipped.push(SkippedStatement {
                index,
                statement,
                error: e.to_string(),
            });
        }
    }

    skipped
}

/// Split a script into individual statements on `;` boundaries.
///
/// Semicolons inside single/double quotes, backtick identifiers, `--` line
/// comments and `/* */` block comments do not terminate a statement.
pub fn split_statements(script: &str) -> Vec<String> {
    #[derive(PartialEq)]
    enum State {
        Normal,
        SingleQuote,
        DoubleQuote,
        Backtick,
        LineComment,
        BlockComment,
    }

    let mut statements = Vec::new();
    let mut current = String::new();
    let mut state = State::Normal;
    let mut chars = script.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            State::Normal => match ch {
                '\'' => {
                    state = State::SingleQuote;
                    current.push(ch);
                }
                '"' => {
                    state = State::DoubleQuote;
                    current.push(ch);
                }
                '`' => {
                    state = State::Backtick;
                    current.push(ch);
                }
                '-' if chars.peek() == Some(&'-') => {
                    state = State::LineComment;
                    current.push(ch);
                }
                '/' if chars.peek() == Some(&'*') => {
                    state = State::BlockComment;
                    current.push(ch);
                }
                ';' => {
                    let stmt = current.trim();
                    if !stmt.is_empty() {
                        statements.push(format!("{};", stmt));
                    }
                    current.clear();
                }
                _ => current.push(ch),
            },
            State::SingleQuote => {
                current.push(ch);
                // '' is an escaped quote, not a terminator
                if ch == '\'' {
                    if chars.peek() == Some(&'\'') {
                        current.push(chars.next().unwrap_or('\''));
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuote => {
                current.push(ch);
                if ch == '"' {
                    state = State::Normal;
                }
            }
            State::Backtick => {
                current.push(ch);
                if ch == '`' {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                current.push(ch);
                if ch == '\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                current.push(ch);
                if ch == '*' && chars.peek() == Some(&'/') {
                    current.push(chars.next().unwrap_or('/'));
                    state = State::Normal;
                }
            }
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        statements.push(tail.to_string());
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::source::Cell;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn script_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".sql").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_split_basic() {
        let stmts = split_statements("CREATE TABLE t(x INT); INSERT INTO t VALUES (1);");
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0], "CREATE TABLE t(x INT);");
    }

    #[test]
    fn test_split_respects_quotes() {
        let stmts = split_statements("INSERT INTO t VALUES ('a;b'); SELECT 1;");
        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].contains("'a;b'"));
    }

    #[test]
    fn test_split_respects_comments() {
        let stmts = split_statements("-- setup; not a boundary\nCREATE TABLE t(x INT);");
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_split_escaped_single_quote() {
        let stmts = split_statements("INSERT INTO t VALUES ('it''s; fine');");
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_split_unterminated_tail() {
        let stmts = split_statements("CREATE TABLE t(x INT)");
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_replay_skips_invalid_statements() {
        let file = script_file(
            "CREATE TABLE t(x INT);\nINSERT INTO t VALUES (1);\nGARBAGE STATEMENT;\n",
        );

        let load = SqlScriptReader::new().read_file(file.path()).unwrap();
        assert_eq!(load.table_name, "t");
        assert_eq!(load.table.row_count(), 1);
        assert_eq!(load.table.get(0, 0), Some(&Cell::Number(1.0)));
        assert_eq!(load.skipped.len(), 1);
        assert_eq!(load.skipped[0].index, 2);
        assert!(load.skipped[0].statement.contains("GARBAGE"));
    }

    #[test]
    fn test_replay_no_tables() {
        let file = script_file("SELECT 1;\n");
        let err = SqlScriptReader::new().read_file(file.path()).unwrap_err();
        assert!(matches!(err, AlembicError::NoTable(_)));
    }

    #[test]
    fn test_replay_first_table_by_creation_order() {
        let file = script_file(
            "CREATE TABLE second_alpha(x INT);\n\
             CREATE TABLE a_first(y INT);\n\
             INSERT INTO second_alpha VALUES (7);\n",
        );

        let load = SqlScriptReader::new().read_file(file.path()).unwrap();
        assert_eq!(load.table_name, "second_alpha");
    }
}
