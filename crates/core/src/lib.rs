//! Shared primitives for all Rust crates in datasweep.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across datasweep crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
///
/// Every variant carries a human-readable message; [`AppError::kind`] gives
/// the stable category name reported alongside it.
#[derive(Debug, Error)]
pub enum AppError {
    /// Scanned directory is missing, not a directory, or unreadable.
    #[error("directory error: {0}")]
    Directory(String),

    /// Threshold date does not match `YYYY-MM-DD`.
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),

    /// Moving or deleting a single file failed.
    #[error("file action error: {0}")]
    FileAction(String),

    /// Source spreadsheet could not be opened or decoded.
    #[error("source read error: {0}")]
    SourceRead(String),

    /// Destination script could not be written.
    #[error("destination write error: {0}")]
    DestinationWrite(String),

    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Operation exists but is intentionally not implemented.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable snake-case category of this error.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Directory(_) => "directory_error",
            Self::InvalidDateFormat(_) => "invalid_date_format",
            Self::FileAction(_) => "file_action_error",
            Self::SourceRead(_) => "source_read_error",
            Self::DestinationWrite(_) => "destination_write_error",
            Self::Validation(_) => "validation_error",
            Self::Unsupported(_) => "unsupported",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Returns the message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Directory(message)
            | Self::InvalidDateFormat(message)
            | Self::FileAction(message)
            | Self::SourceRead(message)
            | Self::DestinationWrite(message)
            | Self::Validation(message)
            | Self::Unsupported(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}
