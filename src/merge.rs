//! Combining a resource's fixed columns with its attribute overrides.
//!
//! Assets carry a typed base row plus any number of `(name, value)` rows
//! in `asset_attributes`. The merged record keeps both sides apart and
//! only flattens them when serialized:
//!
//! 1. the base row's JSON object,
//! 2. each override in query order, replacing any field of that name,
//! 3. `created`, rendered as `YYYY-MM-DD HH:MM:SS` local time.
//!
//! Override names are not unique in the database. When one asset has two
//! overrides with the same name the later one in query order wins; the
//! backend does not guarantee that order, so such duplicates are logged.

use std::collections::HashSet;

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::model::{Asset, AssetAttribute, JsonTime};

/// Key injected into every merged record.
pub const CREATED_KEY: &str = "created";

/// A resource whose fields can be overridden by attribute rows.
pub trait Overridable: Serialize {
    fn id(&self) -> &str;
    fn created(&self) -> Option<JsonTime>;
}

impl Overridable for Asset {
    fn id(&self) -> &str {
        &self.id
    }

    fn created(&self) -> Option<JsonTime> {
        self.created
    }
}

/// A base record plus the overrides that apply to it.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord<T> {
    pub base: T,
    /// `(name, value)` pairs in query order, duplicates included.
    pub overrides: Vec<(String, String)>,
}

pub type MergedAsset = MergedRecord<Asset>;

/// Attach the overrides belonging to `base`; rows for other IDs are ignored.
pub fn merge<T: Overridable>(
    base: T,
    overrides: impl IntoIterator<Item = AssetAttribute>,
) -> MergedRecord<T> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();

    for attr in overrides {
        if attr.asset_id != base.id() {
            continue;
        }
        if !seen.insert(attr.name.clone()) {
            log::warn!(
                "asset {} has duplicate attribute '{}'; keeping the last one read",
                base.id(),
                attr.name
            );
        }
        pairs.push((attr.name, attr.value));
    }

    MergedRecord {
        base,
        overrides: pairs,
    }
}

impl<T: Overridable> MergedRecord<T> {
    /// The flat, schema-less view written to the backup.
    pub fn to_map(&self) -> serde_json::Result<Map<String, Value>> {
        let mut map = match serde_json::to_value(&self.base)? {
            Value::Object(map) => map,
            other => {
                return Err(serde_json::Error::custom(format!(
                    "resource must serialize to an object, got {other}"
                )))
            }
        };

        for (name, value) in &self.overrides {
            map.insert(name.clone(), Value::String(value.clone()));
        }

        let created = self
            .base
            .created()
            .map(|t| t.format())
            .unwrap_or_default();
        map.insert(CREATED_KEY.to_string(), Value::String(created));

        Ok(map)
    }
}

impl<T: Overridable> Serialize for MergedRecord<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
