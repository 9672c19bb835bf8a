//! # Error Module
//!
//! Error types for wifiscope-core.
//!
//! Two families live here:
//! - [`PlatformError`]: a fault raised by the platform WiFi provider. The
//!   [`WiFiManagerWrapper`](crate::WiFiManagerWrapper) swallows these and
//!   substitutes a safe default.
//! - [`WifiError`]: everything else (settings storage, encoding, parsing).

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, WifiError>;

/// A fault raised by a platform WiFi provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The capability is not available on this device or platform.
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// An external command failed or exited non-zero.
    #[error("command failed: {0}")]
    Command(String),

    /// Provider output could not be parsed.
    #[error("unparseable provider output: {0}")]
    Parse(String),

    /// An I/O error while talking to the provider.
    #[error("provider I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PlatformError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Errors from the wifiscope domain model.
#[derive(Debug, Error)]
pub enum WifiError {
    /// redb database could not be opened or created.
    #[error("settings database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// redb transaction could not be started.
    #[error("settings transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// redb table could not be opened.
    #[error("settings table error: {0}")]
    Table(#[from] redb::TableError),

    /// redb storage layer failure.
    #[error("settings storage error: {0}")]
    Storage(#[from] redb::StorageError),

    /// redb commit failure.
    #[error("settings commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Filesystem error around the settings database.
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings record could not be encoded or decoded.
    #[error("settings encoding error: {0}")]
    Encoding(#[from] postcard::Error),

    /// A platform fault that was propagated instead of swallowed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// A band name could not be parsed.
    #[error("invalid band '{0}': expected 2.4, 5 or 6 (GHz)")]
    InvalidBand(String),

    /// A value could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}
