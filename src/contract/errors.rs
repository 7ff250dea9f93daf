//! Contract error types
//!
//! Error codes:
//! - LEDGERKV_DECODE_ERROR: argument missing, not JSON, or not an object
//! - LEDGERKV_NOT_FOUND: no handler bound to the requested function name
//! - LEDGERKV_ENCODE_ERROR: a handler result could not be serialized
//! - LEDGERKV_STORE_ERROR: the state store rejected a call
//!
//! Every variant is caught at the dispatch boundary and turned into an
//! error envelope; none escape to the transport.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for contract operations
pub type ContractResult<T> = Result<T, ContractError>;

/// Failures raised while routing or executing a contract call
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Function not found: {0}")]
    NotFound(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ContractError {
    /// Create a decode error
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode(reason.into())
    }

    /// Create a not-found error for a function name
    pub fn not_found(function: impl Into<String>) -> Self {
        Self::NotFound(function.into())
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ContractError::Decode(_) => "LEDGERKV_DECODE_ERROR",
            ContractError::NotFound(_) => "LEDGERKV_NOT_FOUND",
            ContractError::Encode(_) => "LEDGERKV_ENCODE_ERROR",
            ContractError::Store(_) => "LEDGERKV_STORE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_function() {
        let err = ContractError::not_found("transfer");
        assert_eq!(err.code(), "LEDGERKV_NOT_FOUND");
        assert!(err.to_string().contains("transfer"));
    }

    #[test]
    fn test_store_error_converts() {
        let err: ContractError = StoreError::CursorClosed.into();
        assert_eq!(err.code(), "LEDGERKV_STORE_ERROR");
        assert!(err.to_string().contains("Cursor already closed"));
    }
}
