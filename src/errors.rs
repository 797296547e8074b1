use thiserror::Error;

/// Why a stored secret could not be turned back into plaintext.
///
/// Only the strict `crypto::decrypt` entry point surfaces this; the
/// exporter never aborts on it and blanks the field instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("secret is not valid base64: {0}")]
    Base64(String),

    #[error("ciphertext length {0} is not a positive multiple of the block size")]
    Length(usize),

    #[error("invalid padding length {0}: wrong key or corrupted ciphertext")]
    Padding(usize),
}

/// All errors that can abort an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Data store errors ---
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("MySQL error: {0}")]
    Mysql(#[from] mysql::Error),

    #[error("Reading table '{table}' failed: {source}")]
    Query {
        table: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for exporter results.
pub type Result<T> = std::result::Result<T, ExportError>;
