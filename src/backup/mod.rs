//! Backup assembly and persistence.
//!
//! This module provides:
//! - The `BackupDocument` root artifact (`document`)
//! - The ordered read/decrypt/merge pipeline (`export`)
//! - Atomic JSON writing (`writer`)

pub mod document;
pub mod export;
pub mod writer;

pub use document::{BackupDocument, BackupSummary};
pub use export::{export_backup, ExportRun};
pub use writer::{to_pretty_json, write_backup};
