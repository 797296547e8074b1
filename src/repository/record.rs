//! Backend-neutral rows with lenient column access.
//!
//! Column sets drift between gateway releases, so a missing or NULL
//! column reads as the type's default instead of failing the export.

use std::collections::HashMap;

use rusqlite::types::Value;
use rusqlite::Row;

use crate::model::JsonTime;

/// One row, keyed by lower-cased column name.
#[derive(Debug, Clone, Default)]
pub struct Record {
    values: HashMap<String, Value>,
}

impl Record {
    /// Copy every column of a SQLite row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let stmt: &rusqlite::Statement<'_> = row.as_ref();
        let mut values = HashMap::with_capacity(stmt.column_count());
        for (idx, name) in stmt.column_names().into_iter().enumerate() {
            values.insert(name.to_ascii_lowercase(), row.get::<_, Value>(idx)?);
        }
        Ok(Self { values })
    }

    fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn text(&self, column: &str) -> String {
        match self.get(column) {
            Some(Value::Text(s)) => s.clone(),
            Some(Value::Integer(i)) => i.to_string(),
            Some(Value::Real(f)) => f.to_string(),
            Some(Value::Blob(b)) => String::from_utf8_lossy(b).into_owned(),
            Some(Value::Null) | None => String::new(),
        }
    }

    pub fn int(&self, column: &str) -> i64 {
        match self.get(column) {
            Some(Value::Integer(i)) => *i,
            Some(Value::Real(f)) => *f as i64,
            Some(Value::Text(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        }
    }

    /// Booleans may be stored as `0/1`, `"true"/"false"` or `"1"/"0"`.
    pub fn boolean(&self, column: &str) -> bool {
        match self.get(column) {
            Some(Value::Integer(i)) => *i != 0,
            Some(Value::Real(f)) => *f != 0.0,
            Some(Value::Text(s)) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "t" | "yes" | "y"
            ),
            _ => false,
        }
    }

    pub fn time(&self, column: &str) -> Option<JsonTime> {
        match self.get(column) {
            Some(Value::Text(s)) => JsonTime::parse(s),
            Some(Value::Integer(secs)) => JsonTime::from_unix(*secs),
            _ => None,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into().to_ascii_lowercase(), v))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record::from_iter([
            ("name", Value::Text("web".into())),
            ("port", Value::Text(" 2222 ".into())),
            ("active", Value::Integer(1)),
            ("is_share", Value::Text("true".into())),
            ("owner", Value::Null),
            ("limit_size", Value::Integer(-1)),
            ("created", Value::Text("2023-01-02 03:04:05".into())),
        ])
    }

    #[test]
    fn text_coerces_and_defaults() {
        let r = record();
        assert_eq!(r.text("name"), "web");
        assert_eq!(r.text("limit_size"), "-1");
        assert_eq!(r.text("owner"), "");
        assert_eq!(r.text("missing"), "");
    }

    #[test]
    fn int_parses_text_columns() {
        let r = record();
        assert_eq!(r.int("port"), 2222);
        assert_eq!(r.int("limit_size"), -1);
        assert_eq!(r.int("name"), 0);
        assert_eq!(r.int("missing"), 0);
    }

    #[test]
    fn boolean_accepts_common_encodings() {
        let r = record();
        assert!(r.boolean("active"));
        assert!(r.boolean("is_share"));
        assert!(!r.boolean("owner"));
        assert!(!r.boolean("missing"));
    }

    #[test]
    fn time_parses_or_is_none() {
        let r = record();
        assert_eq!(r.time("created").unwrap().format(), "2023-01-02 03:04:05");
        assert!(r.time("name").is_none());
        assert!(r.time("owner").is_none());
    }

    #[test]
    fn column_names_are_case_insensitive() {
        let r = Record::from_iter([("UserName", Value::Text("alice".into()))]);
        assert_eq!(r.text("username"), "alice");
    }
}
