//! Unified error type for the expense store and its query hooks.

use thiserror::Error;

/// Every failure the store, the hooks, or the configuration layer can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// User-correctable input problem, raised before any statement is issued.
    #[error("Validation error: {message}")]
    Validation {
        /// Message suitable for showing to the user
        message: String,
    },

    /// The schema could not be prepared; the next call retries initialization.
    #[error("Storage unavailable: {message}")]
    StorageUnavailable {
        /// Underlying cause
        message: String,
    },

    /// A statement against the durable store failed.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Underlying cause
        message: String,
    },

    /// I/O failure while touching the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True when the failure is something the user can fix by editing input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
