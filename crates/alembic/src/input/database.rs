//! Embedded-database reader backed by SQLite.

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use rusqlite::types::ValueRef;
use sha2::{Digest, Sha256};

use super::detect::SourceKind;
use super::source::{Cell, DataTable, SourceMetadata};
use crate::error::{AlembicError, Result};

/// Reads a SQLite database file into a [`DataTable`].
///
/// The file is opened directly (no script execution); the first table in
/// catalog creation order is selected.
pub struct DatabaseReader;

impl DatabaseReader {
    pub fn new() -> Self {
        Self
    }

    /// Open the file, select its first table and load all rows.
    ///
    /// Returns the table, source metadata and the selected table's name.
    /// Fails with [`AlembicError::NoTable`] when the database contains no
    /// tables, and with a SQLite error when the file is not a database.
    pub fn read_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(DataTable, SourceMetadata, String)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| AlembicError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let conn = Connection::open(path)?;
        let table_name = first_table_name(&conn)?
            .ok_or_else(|| AlembicError::NoTable(format!("no tables in '{}'", path.display())))?;
        let table = load_table(&conn, &table_name)?;

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            SourceKind::Database,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata, table_name))
    }
}

impl Default for DatabaseReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of the first user table in catalog creation order, if any.
///
/// Ordering by `rowid` pins "first" to creation order, which is stable for
/// a given file; `sqlite_master` enumeration order alone is not guaranteed.
pub(crate) fn first_table_name(conn: &Connection) -> Result<Option<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type='table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY rowid LIMIT 1",
    )?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => Ok(Some(row.get(0)?)),
        None => Ok(None),
    }
}

/// Load every row of `table_name` as typed cells.
pub(crate) fn load_table(conn: &Connection, table_name: &str) -> Result<DataTable> {
    // Table names come from sqlite_master, not user input; quoting still
    // guards against names containing special characters.
    let quoted = table_name.replace('"', "\"\"");
    let mut stmt = conn.prepare(&format!("SELECT * FROM \"{}\"", quoted))?;

    let headers: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    if headers.is_empty() {
        return Err(AlembicError::EmptyData(format!(
            "table '{}' has no columns",
            table_name
        )));
    }

    let column_count = headers.len();
    let mut rows_out = Vec::new();
    let mut rows = stmt.query([])?;

    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(column_count);
        for i in 0..column_count {
            cells.push(cell_from_sql(row.get_ref(i)?));
        }
        rows_out.push(cells);
    }

    Ok(DataTable::new(headers, rows_out))
}

/// Map a SQLite value to a [`Cell`].
fn cell_from_sql(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null => Cell::Null,
        ValueRef::Integer(i) => Cell::Number(i as f64),
        ValueRef::Real(f) => Cell::Number(f),
        ValueRef::Text(t) => Cell::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Cell::Text(String::from_utf8_lossy(b).into_owned()),
    }
}
