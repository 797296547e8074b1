//! Read-only access to the gateway database.
//!
//! This module provides:
//! - The `Repository` trait the exporter reads through
//! - Lenient, backend-neutral rows (`record`)
//! - Per-entity table mappings (`mapping`)
//! - The SQLite backend (`sqlite`)
//! - The MySQL backend (`mysql`)

pub mod mapping;
pub mod mysql;
pub mod record;
pub mod sqlite;

pub use self::mysql::MysqlRepository;
pub use mapping::FromRecord;
pub use record::Record;
pub use sqlite::SqliteRepository;

use crate::errors::Result;
use crate::model::AssetAttribute;

/// Join table linking users to groups.
pub const GROUP_MEMBERS_TABLE: &str = "user_group_members";

/// Read-only view of the gateway's tables.
///
/// Rows come back in the backend's natural order; nothing here sorts.
pub trait Repository {
    /// Every row of `table`.
    fn scan(&self, table: &'static str) -> Result<Vec<Record>>;

    /// Rows of `table` whose `column` equals `value`.
    fn find_where(&self, table: &'static str, column: &'static str, value: &str)
        -> Result<Vec<Record>>;

    /// Every entity of kind `T`.
    fn find_all<T: FromRecord>(&self) -> Result<Vec<T>> {
        let rows = self.scan(T::TABLE)?;
        Ok(rows.iter().map(T::from_record).collect())
    }

    /// User IDs belonging to a group, in query order.
    fn group_members(&self, group_id: &str) -> Result<Vec<String>> {
        let rows = self.find_where(GROUP_MEMBERS_TABLE, "user_group_id", group_id)?;
        Ok(rows.iter().map(|r| r.text("user_id")).collect())
    }

    /// Attribute overrides of one asset, in query order.
    fn asset_attributes(&self, asset_id: &str) -> Result<Vec<AssetAttribute>> {
        let rows = self.find_where(AssetAttribute::TABLE, "asset_id", asset_id)?;
        Ok(rows.iter().map(AssetAttribute::from_record).collect())
    }
}
