//! State store error types
//!
//! Error codes:
//! - LEDGERKV_STORE_IO_ERROR
//! - LEDGERKV_STORE_CORRUPTION
//! - LEDGERKV_STORE_INVALID_KEY
//! - LEDGERKV_STORE_CURSOR_CLOSED

use std::io;

use thiserror::Error;

/// Result type for state store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by a [`RecordStore`](super::RecordStore) or its cursors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O failure: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("State log corrupted at byte {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    #[error("Invalid composite key: {0}")]
    InvalidKey(String),

    #[error("Cursor already closed")]
    CursorClosed,
}

impl StoreError {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a corruption error anchored at a log offset
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Create an invalid key error
    pub fn invalid_key(reason: impl Into<String>) -> Self {
        Self::InvalidKey(reason.into())
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "LEDGERKV_STORE_IO_ERROR",
            StoreError::Corruption { .. } => "LEDGERKV_STORE_CORRUPTION",
            StoreError::InvalidKey(_) => "LEDGERKV_STORE_INVALID_KEY",
            StoreError::CursorClosed => "LEDGERKV_STORE_CURSOR_CLOSED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_codes() {
        assert_eq!(
            StoreError::io("x", io::Error::new(io::ErrorKind::Other, "x")).code(),
            "LEDGERKV_STORE_IO_ERROR"
        );
        assert_eq!(
            StoreError::corruption_at_offset(0, "x").code(),
            "LEDGERKV_STORE_CORRUPTION"
        );
        assert_eq!(StoreError::invalid_key("x").code(), "LEDGERKV_STORE_INVALID_KEY");
        assert_eq!(StoreError::CursorClosed.code(), "LEDGERKV_STORE_CURSOR_CLOSED");
    }

    #[test]
    fn test_corruption_display_has_offset() {
        let err = StoreError::corruption_at_offset(1024, "checksum mismatch");
        let display = err.to_string();
        assert!(display.contains("1024"));
        assert!(display.contains("checksum mismatch"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = StoreError::io("open failed", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
    }
}
