use std::path::PathBuf;

use thiserror::Error;

/// Type alias for Result with SheetsError
pub type Result<T> = std::result::Result<T, SheetsError>;

/// Error types for the spreadsheet range codec and credential lifecycle
#[derive(Error, Debug)]
pub enum SheetsError {
    /// Caller supplied a value outside the valid domain (bad column index,
    /// malformed cell reference, empty sheet name, zero-sized block)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The refresh collaborator rejected the stored refresh token
    #[error("token refresh rejected: {0}")]
    RefreshRejected(String),

    /// The interactive authorization flow did not produce a credential
    #[error("authorization failed: {0}")]
    AuthorizationFailed(String),

    /// Terminal failure of an `obtain` call, wrapping the underlying cause
    #[error("credential unavailable: {source}")]
    CredentialUnavailable {
        #[source]
        source: Box<SheetsError>,
    },

    /// Token store could not be read (I/O failure or corrupt content)
    #[error("token store read failed at {path:?}: {message}")]
    StoreRead { path: PathBuf, message: String },

    /// Token store could not be written
    #[error("token store write failed at {path:?}: {message}")]
    StoreWrite { path: PathBuf, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SheetsError {
    /// Check if the error is recovered locally by the lifecycle manager
    /// (a rejected refresh falls through to interactive authorization)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SheetsError::RefreshRejected(_))
    }

    /// Wrap this error as the terminal failure of an `obtain` call
    pub fn into_unavailable(self) -> SheetsError {
        SheetsError::CredentialUnavailable {
            source: Box::new(self),
        }
    }
}
