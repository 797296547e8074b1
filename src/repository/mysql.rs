//! MySQL backend.

use std::cell::RefCell;

use ::mysql::prelude::Queryable;
use ::mysql::{Conn, Opts, OptsBuilder, Row, Value as MysqlValue};
use rusqlite::types::Value;

use super::record::Record;
use super::Repository;
use crate::config::MysqlSettings;
use crate::errors::{ExportError, Result};

/// A single connection to the gateway's MySQL schema.
///
/// The exporter reads sequentially, so one connection is enough.
pub struct MysqlRepository {
    conn: RefCell<Conn>,
}

impl MysqlRepository {
    /// Connect using the `[mysql]` settings.
    pub fn connect(settings: &MysqlSettings) -> Result<Self> {
        let conn = Conn::new(Opts::from(connect_options(settings)))?;
        log::debug!(
            "connected to mysql {}:{}/{}",
            settings.hostname,
            settings.port,
            settings.database
        );

        Ok(Self {
            conn: RefCell::new(conn),
        })
    }

    fn records(
        &self,
        table: &'static str,
        rows: ::mysql::Result<Vec<Row>>,
    ) -> Result<Vec<Record>> {
        let rows = rows.map_err(|source| ExportError::Query {
            table,
            source: Box::new(source),
        })?;

        let records: Vec<Record> = rows.iter().map(to_record).collect();
        log::debug!("read {} rows from {table}", records.len());
        Ok(records)
    }
}

impl Repository for MysqlRepository {
    fn scan(&self, table: &'static str) -> Result<Vec<Record>> {
        let rows = self.conn.borrow_mut().query(select_sql(table, None));
        self.records(table, rows)
    }

    fn find_where(
        &self,
        table: &'static str,
        column: &'static str,
        value: &str,
    ) -> Result<Vec<Record>> {
        let rows = self
            .conn
            .borrow_mut()
            .exec(select_sql(table, Some(column)), (value,));
        self.records(table, rows)
    }
}

fn connect_options(settings: &MysqlSettings) -> OptsBuilder {
    OptsBuilder::new()
        .ip_or_hostname(Some(settings.hostname.as_str()))
        .tcp_port(settings.port)
        .user(Some(settings.username.as_str()).filter(|u| !u.is_empty()))
        .pass(Some(settings.password.as_str()).filter(|p| !p.is_empty()))
        .db_name(Some(settings.database.as_str()))
}

fn select_sql(table: &str, column: Option<&str>) -> String {
    match column {
        Some(column) => format!("SELECT * FROM `{table}` WHERE `{column}` = ?"),
        None => format!("SELECT * FROM `{table}`"),
    }
}

fn to_record(row: &Row) -> Record {
    row.columns_ref()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = row.as_ref(idx).map(column_value).unwrap_or(Value::Null);
            (column.name_str().into_owned(), value)
        })
        .collect()
}

/// Map a MySQL value onto the row model shared with SQLite.
///
/// The text protocol returns every column as bytes; dates from the binary
/// protocol are rendered the way SQLite stores them.
fn column_value(value: &MysqlValue) -> Value {
    match value {
        MysqlValue::NULL => Value::Null,
        MysqlValue::Bytes(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        MysqlValue::Int(i) => Value::Integer(*i),
        MysqlValue::UInt(u) => Value::Integer(i64::try_from(*u).unwrap_or(i64::MAX)),
        MysqlValue::Float(f) => Value::Real(f64::from(*f)),
        MysqlValue::Double(f) => Value::Real(*f),
        MysqlValue::Date(year, month, day, hour, minute, second, _) => Value::Text(format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
        )),
        MysqlValue::Time(negative, days, hours, minutes, seconds, _) => {
            let sign = if *negative { "-" } else { "" };
            let hours = u64::from(*days) * 24 + u64::from(*hours);
            Value::Text(format!("{sign}{hours:02}:{minutes:02}:{seconds:02}"))
        }
    }
}
