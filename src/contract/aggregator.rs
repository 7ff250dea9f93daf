//! Scan result aggregation
//!
//! Drains a cursor into an ordered list of `{key, value}` entries. Values
//! are decoded as JSON when possible; anything that does not parse is kept
//! as a plain string, since records may hold legacy non-JSON values.
//!
//! The cursor is consumed and closed exactly once, whether draining
//! finishes or fails part way.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ContractError, ContractResult};
use crate::observability::{log_event, Event};
use crate::store::{StateCursor, StateEntry, StoreResult};

/// One entry of a scan result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEntry {
    pub key: String,
    pub value: Value,
}

/// Decoded value of a stored record: JSON if it parses, else the raw text
pub fn decode_value(raw: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(raw) {
        Ok(value) => value,
        Err(_) => Value::String(String::from_utf8_lossy(raw).into_owned()),
    }
}

/// Drain `cursor` to completion and close it.
///
/// Steps with no entry or an empty value are skipped. On a mid-drain
/// failure the cursor is still closed and the drain error is returned.
pub fn drain_cursor<C: StateCursor>(mut cursor: C) -> ContractResult<Vec<QueryEntry>> {
    let drained = collect_entries(&mut cursor);
    let closed = cursor.close();

    match (drained, closed) {
        (Ok(entries), Ok(())) => Ok(entries),
        (Ok(_), Err(close_err)) => Err(close_err.into()),
        (Err(drain_err), Ok(())) => Err(drain_err.into()),
        (Err(drain_err), Err(close_err)) => {
            log_event(
                Event::CursorCloseFailed,
                &[("reason", &close_err.to_string())],
            );
            Err(drain_err.into())
        }
    }
}

fn collect_entries<C: StateCursor>(cursor: &mut C) -> StoreResult<Vec<QueryEntry>> {
    let mut entries = Vec::new();
    loop {
        let step = cursor.next()?;
        if let Some(StateEntry { key, value }) = step.entry {
            if !value.is_empty() {
                entries.push(QueryEntry {
                    key,
                    value: decode_value(&value),
                });
            }
        }
        if step.done {
            return Ok(entries);
        }
    }
}

/// Serialize drained entries as a JSON array
pub fn encode_entries(entries: &[QueryEntry]) -> ContractResult<Vec<u8>> {
    serde_json::to_vec(entries).map_err(|e| ContractError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CursorStep, StoreError};
    use serde_json::json;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Scripted cursor that counts closes
    struct ScriptedCursor {
        steps: VecDeque<StoreResult<CursorStep>>,
        closes: Rc<Cell<u32>>,
        fail_close: bool,
    }

    impl ScriptedCursor {
        fn new(steps: Vec<StoreResult<CursorStep>>) -> (Self, Rc<Cell<u32>>) {
            let closes = Rc::new(Cell::new(0));
            let cursor = Self {
                steps: steps.into(),
                closes: Rc::clone(&closes),
                fail_close: false,
            };
            (cursor, closes)
        }

        fn failing_close(steps: Vec<StoreResult<CursorStep>>) -> (Self, Rc<Cell<u32>>) {
            let (mut cursor, closes) = Self::new(steps);
            cursor.fail_close = true;
            (cursor, closes)
        }
    }

    impl StateCursor for ScriptedCursor {
        fn next(&mut self) -> StoreResult<CursorStep> {
            self.steps.pop_front().unwrap_or_else(|| Ok(CursorStep::done()))
        }

        fn close(&mut self) -> StoreResult<()> {
            self.closes.set(self.closes.get() + 1);
            if self.fail_close {
                return Err(StoreError::CursorClosed);
            }
            Ok(())
        }
    }

    fn step(key: &str, value: &[u8], done: bool) -> StoreResult<CursorStep> {
        Ok(CursorStep {
            entry: Some(StateEntry {
                key: key.to_string(),
                value: value.to_vec(),
            }),
            done,
        })
    }

    #[test]
    fn test_empty_scan_closes_once() {
        let (cursor, closes) = ScriptedCursor::new(vec![Ok(CursorStep::done())]);
        let entries = drain_cursor(cursor).unwrap();
        assert!(entries.is_empty());
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_json_and_string_fallback() {
        let (cursor, _) = ScriptedCursor::new(vec![
            step("a", br#"{"n":1}"#, false),
            step("b", b"legacy plain text", false),
            Ok(CursorStep::done()),
        ]);
        let entries = drain_cursor(cursor).unwrap();
        assert_eq!(entries[0].value, json!({"n": 1}));
        assert_eq!(entries[1].value, json!("legacy plain text"));
    }

    #[test]
    fn test_skips_empty_and_absent_entries() {
        let (cursor, _) = ScriptedCursor::new(vec![
            step("empty", b"", false),
            Ok(CursorStep {
                entry: None,
                done: false,
            }),
            step("kept", b"1", false),
            Ok(CursorStep::done()),
        ]);
        let keys: Vec<String> = drain_cursor(cursor).unwrap().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["kept"]);
    }

    #[test]
    fn test_final_step_entry_is_kept() {
        let (cursor, _) = ScriptedCursor::new(vec![step("a", b"1", false), step("b", b"2", true)]);
        assert_eq!(drain_cursor(cursor).unwrap().len(), 2);
    }

    #[test]
    fn test_mid_drain_failure_still_closes() {
        let (cursor, closes) = ScriptedCursor::new(vec![
            step("a", b"1", false),
            Err(StoreError::invalid_key("boom")),
        ]);
        let err = drain_cursor(cursor).unwrap_err();
        assert_eq!(err.code(), "LEDGERKV_STORE_ERROR");
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_close_failure_after_clean_drain_is_returned() {
        let (cursor, closes) =
            ScriptedCursor::failing_close(vec![step("a", b"1", false), Ok(CursorStep::done())]);
        let err = drain_cursor(cursor).unwrap_err();
        assert_eq!(err.code(), "LEDGERKV_STORE_ERROR");
        assert!(err.to_string().contains("Cursor already closed"));
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_drain_error_wins_over_close_failure() {
        let (cursor, closes) =
            ScriptedCursor::failing_close(vec![Err(StoreError::invalid_key("boom"))]);
        let err = drain_cursor(cursor).unwrap_err();
        assert_eq!(err.code(), "LEDGERKV_STORE_ERROR");
        assert!(err.to_string().contains("boom"));
        assert!(!err.to_string().contains("Cursor already closed"));
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_encoded_result_keeps_cursor_order() {
        let (cursor, _) = ScriptedCursor::new(vec![
            step("k1", br#""x""#, false),
            step("k2", b"2", false),
            Ok(CursorStep::done()),
        ]);
        let bytes = encode_entries(&drain_cursor(cursor).unwrap()).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            parsed,
            json!([{"key": "k1", "value": "x"}, {"key": "k2", "value": 2}])
        );
    }
}
