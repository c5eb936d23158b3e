/*!
 * Error types for the songlingo library.
 *
 * This module contains custom error types for the different parts of the
 * library, using the thiserror crate for ergonomic error definitions.
 *
 * Errors fall into four classes:
 * - fatal store errors (storage unavailable or corrupt at initialization)
 * - caller misuse (store not initialized, unknown song or language ids)
 * - provider errors, which never leave the translation resolver
 * - storage failures while applying a command
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The provider answered but had nothing usable for the input
    #[error("No usable result: {0}")]
    NoResult(String),

    /// The provider returned output that only echoes the input or a placeholder
    #[error("Degenerate output rejected: {0}")]
    Degenerate(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::ApiError {
                status_code: status.as_u16(),
                message: error.to_string(),
            },
            None => Self::RequestFailed(error.to_string()),
        }
    }
}

/// Errors raised by the persistence store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The durable snapshot slot could not be read or written during initialization
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The saved snapshot could not be restored
    #[error("Stored snapshot is corrupt: {0}")]
    Corrupt(String),

    /// An operation was invoked before `initialize()` or after `close()`
    #[error("Store used before initialization")]
    NotInitialized,

    /// A command referenced a song that does not exist
    #[error("Unknown song id: {0}")]
    UnknownSong(i64),

    /// A command referenced a language that does not exist
    #[error("Unknown language id: {0}")]
    UnknownLanguage(i64),

    /// A lookup referenced a language code that is not seeded
    #[error("Unknown language code: {0}")]
    UnknownLanguageCode(String),

    /// SQL failure while applying a command or running a query
    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The snapshot could not be written after a command; the command was reverted
    #[error("Snapshot save failed: {0}")]
    Snapshot(String),
}

impl StoreError {
    /// Whether this error means the store cannot be used at all
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Corrupt(_))
    }

    /// Whether this error is the caller's fault rather than a storage failure
    pub fn is_caller_misuse(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized
                | Self::UnknownSong(_)
                | Self::UnknownLanguage(_)
                | Self::UnknownLanguageCode(_)
        )
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the persistence store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Config(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
