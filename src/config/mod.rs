//! Exporter configuration, loaded from a TOML file.

pub mod settings;

pub use settings::{Backend, MysqlSettings, Settings, SqliteSettings};
