//! In-memory ordered state store

use std::collections::BTreeMap;
use std::sync::Arc;

use super::cursor::{CursorStats, SnapshotCursor, StateEntry};
use super::errors::StoreResult;
use super::RecordStore;
use crate::keycodec::CompositeKeyDescriptor;

/// `BTreeMap`-backed store. Scans follow lexicographic key order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, Vec<u8>>,
    cursor_stats: Arc<CursorStats>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cursor open/close counters
    pub fn cursor_stats(&self) -> &CursorStats {
        &self.cursor_stats
    }
}

/// Collect every entry whose key starts with `prefix`, in key order
pub(super) fn collect_prefix(records: &BTreeMap<String, Vec<u8>>, prefix: &str) -> Vec<StateEntry> {
    records
        .range(prefix.to_string()..)
        .take_while(|(key, _)| key.starts_with(prefix))
        .map(|(key, value)| StateEntry {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

impl RecordStore for MemoryStore {
    type Cursor = SnapshotCursor;

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.records.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.records.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.records.remove(key);
        Ok(())
    }

    fn scan_by_composite_prefix(
        &mut self,
        descriptor: &CompositeKeyDescriptor,
    ) -> StoreResult<SnapshotCursor> {
        let prefix = self.encode_composite_key(descriptor)?;
        let entries = collect_prefix(&self.records, &prefix);
        Ok(SnapshotCursor::new(entries, Arc::clone(&self.cursor_stats)))
    }
}
