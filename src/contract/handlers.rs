//! CRUD handlers
//!
//! Each handler is a plain function of the invocation context and the
//! decoded attribute map. A handler returns the payload bytes for the
//! success envelope; an empty vector means "no payload".

use super::aggregator::{drain_cursor, encode_entries};
use super::context::InvocationContext;
use super::errors::{ContractError, ContractResult};
use crate::keycodec::{derive_composite_key, derive_storage_key, AttributeMap};
use crate::observability::{Event, Logger, Severity};
use crate::store::RecordStore;

fn trace_access<S: RecordStore + ?Sized>(
    ctx: &InvocationContext<'_, S>,
    op: &str,
    key: &impl std::fmt::Display,
) {
    if Logger::enabled(Severity::Trace) {
        Logger::trace(
            Event::StateAccess.as_str(),
            &[
                ("op", op),
                ("key", &key.to_string()),
                ("tx_id", &ctx.tx_id_string()),
            ],
        );
    }
}

/// Read the record addressed by `attrs`; absent records yield no payload
pub fn get<S: RecordStore + ?Sized>(
    ctx: &mut InvocationContext<'_, S>,
    attrs: &AttributeMap,
) -> ContractResult<Vec<u8>> {
    let key = derive_storage_key(&*ctx.store, attrs)?;
    trace_access(ctx, "get", &key);
    Ok(ctx.store.get(key.as_str())?.unwrap_or_default())
}

/// Write `attrs` itself as the record value, overwriting unconditionally
pub fn put<S: RecordStore + ?Sized>(
    ctx: &mut InvocationContext<'_, S>,
    attrs: &AttributeMap,
) -> ContractResult<Vec<u8>> {
    let key = derive_storage_key(&*ctx.store, attrs)?;
    let value = attrs
        .to_json_bytes()
        .map_err(|e| ContractError::Encode(e.to_string()))?;
    trace_access(ctx, "put", &key);
    ctx.store.put(key.as_str(), &value)?;
    Ok(Vec::new())
}

/// Remove the record addressed by `attrs`; absent records are a no-op
pub fn delete<S: RecordStore + ?Sized>(
    ctx: &mut InvocationContext<'_, S>,
    attrs: &AttributeMap,
) -> ContractResult<Vec<u8>> {
    let key = derive_storage_key(&*ctx.store, attrs)?;
    trace_access(ctx, "delete", &key);
    ctx.store.delete(key.as_str())?;
    Ok(Vec::new())
}

/// Prefix-scan every record under the composite key derived from `attrs`
pub fn list<S: RecordStore + ?Sized>(
    ctx: &mut InvocationContext<'_, S>,
    attrs: &AttributeMap,
) -> ContractResult<Vec<u8>> {
    let descriptor = derive_composite_key(attrs);
    trace_access(ctx, "list", &descriptor.object_type.escape_debug());
    let cursor = ctx.store.scan_by_composite_prefix(&descriptor)?;
    let entries = drain_cursor(cursor)?;
    ctx.metrics.add_records_scanned(entries.len() as u64);
    if Logger::enabled(Severity::Trace) {
        Logger::trace(
            Event::ScanComplete.as_str(),
            &[
                ("records", &entries.len().to_string()),
                ("tx_id", &ctx.tx_id_string()),
            ],
        );
    }
    encode_entries(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MetricsRegistry;
    use crate::store::MemoryStore;
    use serde_json::{json, Value};

    fn attrs(value: Value) -> AttributeMap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_get_absent_is_empty() {
        let mut store = MemoryStore::new();
        let metrics = MetricsRegistry::new();
        let mut ctx = InvocationContext::new(&mut store, &metrics);
        assert!(get(&mut ctx, &attrs(json!({"k": 1}))).unwrap().is_empty());
    }

    #[test]
    fn test_put_then_get_returns_attrs() {
        let mut store = MemoryStore::new();
        let metrics = MetricsRegistry::new();
        let mut ctx = InvocationContext::new(&mut store, &metrics);

        let record = attrs(json!({"username": "alice", "age": 30}));
        put(&mut ctx, &record).unwrap();

        let raw = get(&mut ctx, &record).unwrap();
        let value: Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value, json!({"username": "alice", "age": 30}));
    }

    #[test]
    fn test_single_field_put_overwrites_by_name() {
        let mut store = MemoryStore::new();
        let metrics = MetricsRegistry::new();
        let mut ctx = InvocationContext::new(&mut store, &metrics);

        put(&mut ctx, &attrs(json!({"color": "red"}))).unwrap();
        put(&mut ctx, &attrs(json!({"color": "blue"}))).unwrap();

        let raw = get(&mut ctx, &attrs(json!({"color": "anything"}))).unwrap();
        assert_eq!(raw, br#"{"color":"blue"}"#.to_vec());
        drop(ctx);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_then_get_is_empty() {
        let mut store = MemoryStore::new();
        let metrics = MetricsRegistry::new();
        let mut ctx = InvocationContext::new(&mut store, &metrics);

        let record = attrs(json!({"username": "bob", "id": "7"}));
        put(&mut ctx, &record).unwrap();
        delete(&mut ctx, &record).unwrap();
        delete(&mut ctx, &record).unwrap();
        assert!(get(&mut ctx, &record).unwrap().is_empty());
    }

    #[test]
    fn test_list_returns_partition() {
        let mut store = MemoryStore::new();
        let metrics = MetricsRegistry::new();
        let mut ctx = InvocationContext::new(&mut store, &metrics);

        put(&mut ctx, &attrs(json!({"username": "alice", "age": 30}))).unwrap();
        put(&mut ctx, &attrs(json!({"username": "alice", "age": 31}))).unwrap();
        put(&mut ctx, &attrs(json!({"username": "bob", "age": 40}))).unwrap();

        let raw = list(&mut ctx, &attrs(json!({"username": "alice"}))).unwrap();
        let entries: Vec<Value> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["value"], json!({"username": "alice", "age": 30}));
        assert_eq!(entries[1]["value"], json!({"username": "alice", "age": 31}));
        drop(ctx);
        assert_eq!(store.cursor_stats().open(), 0);
    }
}
