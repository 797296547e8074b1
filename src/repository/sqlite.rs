//! SQLite backend.

use std::path::Path;

use rusqlite::{Connection, OpenFlags, ToSql};

use super::record::Record;
use super::Repository;
use crate::errors::{ExportError, Result};

/// A read-only SQLite connection to the gateway database.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open an existing database file read-only.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExportError::ConfigError(format!(
                "sqlite database not found at {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::debug!("opened sqlite database {}", path.display());

        Ok(Self { conn })
    }

    /// Wrap an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn query(&self, table: &'static str, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Record>> {
        let wrap = |source: rusqlite::Error| ExportError::Query {
            table,
            source: Box::new(source),
        };

        let mut stmt = self.conn.prepare(sql).map_err(wrap)?;
        let rows = stmt
            .query_map(params, |row| Record::from_row(row))
            .map_err(wrap)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(wrap)?);
        }

        log::debug!("read {} rows from {table}", records.len());
        Ok(records)
    }
}

impl Repository for SqliteRepository {
    fn scan(&self, table: &'static str) -> Result<Vec<Record>> {
        self.query(table, &format!("SELECT * FROM \"{table}\""), &[])
    }

    fn find_where(
        &self,
        table: &'static str,
        column: &'static str,
        value: &str,
    ) -> Result<Vec<Record>> {
        self.query(
            table,
            &format!("SELECT * FROM \"{table}\" WHERE \"{column}\" = ?1"),
            &[&value],
        )
    }
}
