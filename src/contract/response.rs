//! Response envelopes
//!
//! Every outcome leaves the contract through [`Response`]. Handlers return
//! plain bytes or an error and never shape the envelope themselves.

use serde::{Deserialize, Serialize};

use super::errors::ContractError;

/// Success envelope carrying an optional byte payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessResponse {
    pub payload: Option<Vec<u8>>,
}

/// Error envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    /// Create from a contract error
    pub fn from_error(err: &ContractError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Unified response type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

/// Wire form of a response
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum WireResponse<'a> {
    Ok { payload: Option<String> },
    Error { code: &'a str, message: &'a str },
}

impl Response {
    /// Success with no payload
    pub fn ok() -> Self {
        Response::Success(SuccessResponse { payload: None })
    }

    /// Success carrying `payload`; an empty payload is the same as none
    pub fn success(payload: Vec<u8>) -> Self {
        if payload.is_empty() {
            return Self::ok();
        }
        Response::Success(SuccessResponse {
            payload: Some(payload),
        })
    }

    /// Error envelope for `err`
    pub fn error(err: &ContractError) -> Self {
        Response::Error(ErrorResponse::from_error(err))
    }

    /// Wrap a handler outcome
    pub fn from_result(result: Result<Vec<u8>, ContractError>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(err) => Self::error(&err),
        }
    }

    /// Whether this is a success envelope
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Payload bytes, if this is a success carrying one
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Response::Success(s) => s.payload.as_deref(),
            Response::Error(_) => None,
        }
    }

    /// Error code, if this is an error envelope
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Response::Error(e) => Some(&e.code),
            Response::Success(_) => None,
        }
    }

    /// Error message, if this is an error envelope
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Response::Error(e) => Some(&e.message),
            Response::Success(_) => None,
        }
    }

    /// Render as one JSON line; payload bytes are shown as lossy UTF-8
    pub fn to_json(&self) -> String {
        let wire = match self {
            Response::Success(s) => WireResponse::Ok {
                payload: s
                    .payload
                    .as_deref()
                    .map(|p| String::from_utf8_lossy(p).into_owned()),
            },
            Response::Error(e) => WireResponse::Error {
                code: &e.code,
                message: &e.message,
            },
        };
        serde_json::to_string(&wire).unwrap_or_else(|_| {
            r#"{"status":"error","code":"LEDGERKV_ENCODE_ERROR","message":"response encoding failed"}"#
                .to_string()
        })
    }
}
