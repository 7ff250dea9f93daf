//! Invocation requests and argument decoding

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ContractError, ContractResult};
use crate::keycodec::AttributeMap;

/// Which entry point a request targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entry {
    /// One-time initialization write
    Init,
    /// Named function call
    #[default]
    Invoke,
}

/// A function name plus ordered string arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(default)]
    pub entry: Entry,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    /// Build an init request
    pub fn init(arg: impl Into<String>) -> Self {
        Self {
            entry: Entry::Init,
            function: String::new(),
            args: vec![arg.into()],
        }
    }

    /// Build an invoke request
    pub fn invoke(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            entry: Entry::Invoke,
            function: function.into(),
            args,
        }
    }

    /// Parse one request line
    pub fn parse(json: &str) -> ContractResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ContractError::decode(format!("Invalid request JSON: {}", e)))
    }
}

/// Decode the single positional argument into an attribute map.
///
/// Exactly one argument is accepted, and it must be a JSON object.
pub fn decode_attributes(args: &[String]) -> ContractResult<AttributeMap> {
    let raw = match args {
        [only] => only,
        _ => {
            return Err(ContractError::decode(format!(
                "expected 1 argument, got {}",
                args.len()
            )))
        }
    };

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ContractError::decode(format!("argument is not valid JSON: {}", e)))?;

    match value {
        Value::Object(map) => Ok(AttributeMap::from(map)),
        other => Err(ContractError::decode(format!(
            "argument must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
