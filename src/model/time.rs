//! Timestamps rendered the way the gateway renders them.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Serialize, Serializer};

/// Display format for every exported timestamp.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A point in time, serialized as `YYYY-MM-DD HH:MM:SS` in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonTime(pub DateTime<Local>);

impl JsonTime {
    /// Parse a stored timestamp.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]±hh:mm` (what the SQLite
    /// driver writes) and offset-less variants, which are taken as local.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Local)));
        }
        for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"] {
            if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
                return Some(Self(dt.with_timezone(&Local)));
            }
        }
        for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Local.from_local_datetime(&naive).earliest().map(Self);
            }
        }

        None
    }

    /// Seconds since the Unix epoch, as some drivers store them.
    pub fn from_unix(secs: i64) -> Option<Self> {
        Local.timestamp_opt(secs, 0).single().map(Self)
    }

    pub fn format(&self) -> String {
        self.0.format(DATETIME_FORMAT).to_string()
    }
}

impl Serialize for JsonTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.format(DATETIME_FORMAT))
    }
}
