//! Persisting the backup as pretty-printed JSON.

use std::fs;
use std::path::Path;

use super::document::BackupDocument;
use crate::errors::{ExportError, Result};

/// Render the document with two-space indentation.
pub fn to_pretty_json(doc: &BackupDocument) -> Result<String> {
    serde_json::to_string_pretty(doc)
        .map_err(|e| ExportError::SerializationError(format!("backup: {e}")))
}

/// Serialize and write the backup to `path`.
///
/// The whole document is rendered before anything touches the disk, then
/// written to a temp file in the same directory and renamed into place,
/// so `path` never holds a partial backup.
pub fn write_backup(doc: &BackupDocument, path: &Path) -> Result<()> {
    let json = to_pretty_json(doc)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    if let Err(e) = fs::write(&tmp_path, json.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    log::debug!("wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}
