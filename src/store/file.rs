//! File-backed state store
//!
//! Mutations are appended to `<data_dir>/state/records.log`. On open the log
//! is replayed front to back into an ordered in-memory index: latest put
//! wins, delete removes. Any checksum failure or truncated tail aborts the
//! open; the log is never silently repaired.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::cursor::{CursorStats, SnapshotCursor};
use super::errors::{StoreError, StoreResult};
use super::memory::collect_prefix;
use super::record::{LogOp, LogRecord};
use super::RecordStore;
use crate::keycodec::CompositeKeyDescriptor;
use crate::observability::{log_event, Event};

const STATE_DIR: &str = "state";
const LOG_FILE: &str = "records.log";

/// Append-only, checksummed state store
#[derive(Debug)]
pub struct FileStore {
    log_path: PathBuf,
    file: File,
    sync_writes: bool,
    records: BTreeMap<String, Vec<u8>>,
    log_bytes: u64,
    cursor_stats: Arc<CursorStats>,
}

impl FileStore {
    /// Open or create the state log under `data_dir` and replay it.
    ///
    /// With `sync_writes`, every append is fsynced before returning.
    pub fn open(data_dir: &Path, sync_writes: bool) -> StoreResult<Self> {
        let state_dir = data_dir.join(STATE_DIR);
        fs::create_dir_all(&state_dir).map_err(|e| {
            StoreError::io(
                format!("Failed to create state directory: {}", state_dir.display()),
                e,
            )
        })?;

        let log_path = state_dir.join(LOG_FILE);
        let records = Self::replay(&log_path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| {
                StoreError::io(format!("Failed to open state log: {}", log_path.display()), e)
            })?;

        let log_bytes = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read state log metadata", e))?
            .len();

        Ok(Self {
            log_path,
            file,
            sync_writes,
            records,
            log_bytes,
            cursor_stats: Arc::default(),
        })
    }

    fn replay(log_path: &Path) -> StoreResult<BTreeMap<String, Vec<u8>>> {
        let mut records = BTreeMap::new();

        let data = match fs::read(log_path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(StoreError::io("Failed to read state log", e)),
        };

        let mut offset = 0usize;
        while offset < data.len() {
            let (record, consumed) = LogRecord::deserialize(&data[offset..])
                .map_err(|e| StoreError::corruption_at_offset(offset as u64, e.to_string()))?;

            match record.op {
                LogOp::Put => {
                    records.insert(record.key, record.value);
                }
                LogOp::Delete => {
                    records.remove(&record.key);
                }
            }
            offset += consumed;
        }

        Ok(records)
    }

    /// Append one record. On failure the log is cut back to its last good
    /// length, so the file never holds a record `records` does not.
    fn append(&mut self, record: &LogRecord) -> StoreResult<()> {
        let bytes = record.serialize();

        if let Err(err) = self.write_record(&bytes) {
            self.rollback();
            return Err(err);
        }

        self.log_bytes += bytes.len() as u64;
        Ok(())
    }

    fn write_record(&mut self, bytes: &[u8]) -> StoreResult<()> {
        self.file
            .write_all(bytes)
            .map_err(|e| StoreError::io("Failed to append to state log", e))?;

        if self.sync_writes {
            self.file
                .sync_all()
                .map_err(|e| StoreError::io("fsync failed on state log", e))?;
        }
        Ok(())
    }

    fn rollback(&mut self) {
        if let Err(e) = self.file.set_len(self.log_bytes) {
            log_event(
                Event::StateLogRollbackFailed,
                &[
                    ("log_bytes", &self.log_bytes.to_string()),
                    ("path", &self.log_path.display().to_string()),
                    ("reason", &e.to_string()),
                ],
            );
        }
    }

    /// Path of the state log
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Bytes appended to the log, including replayed history
    pub fn log_bytes(&self) -> u64 {
        self.log_bytes
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no live records exist
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cursor open/close counters
    pub fn cursor_stats(&self) -> &CursorStats {
        &self.cursor_stats
    }
}

impl RecordStore for FileStore {
    type Cursor = SnapshotCursor;

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.records.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.append(&LogRecord::put(key, value.to_vec()))?;
        self.records.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        if !self.records.contains_key(key) {
            return Ok(());
        }
        self.append(&LogRecord::delete(key))?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_state_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path(), false).unwrap();
        assert!(temp_dir.path().join("state").join("records.log").exists());
        assert_eq!(store.path(), temp_dir.path().join("state").join("records.log"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_reopen_replays_latest_state() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut store = FileStore::open(temp_dir.path(), true).unwrap();
            store.put("a", b"1").unwrap();
            store.put("a", b"2").unwrap();
            store.put("b", b"3").unwrap();
            store.delete("b").unwrap();
        }

        let store = FileStore::open(temp_dir.path(), true).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"2".to_vec()));
        assert_eq!(store.get("b").unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_absent_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::open(temp_dir.path(), false).unwrap();
        store.delete("missing").unwrap();
        assert_eq!(store.log_bytes(), 0);
    }

    #[test]
    fn test_corrupt_log_fails_open() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut store = FileStore::open(temp_dir.path(), false).unwrap();
            store.put("key", b"value").unwrap();
        }

        let log_path = temp_dir.path().join("state").join("records.log");
        let mut contents = fs::read(&log_path).unwrap();
        let mid = contents.len() / 2;
        contents[mid] ^= 0xFF;
        fs::write(&log_path, contents).unwrap();

        let err = FileStore::open(temp_dir.path(), false).unwrap_err();
        assert_eq!(err.code(), "LEDGERKV_STORE_CORRUPTION");
    }

    #[test]
    fn test_rollback_drops_torn_tail() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut store = FileStore::open(temp_dir.path(), false).unwrap();
            store.put("a", b"1").unwrap();
            let good_len = store.log_bytes();

            // Half-written record left behind by a failed append
            store.file.write_all(&[0x40, 0x00, 0x00, 0x00, 0x01]).unwrap();
            store.rollback();
            assert_eq!(fs::metadata(store.path()).unwrap().len(), good_len);

            store.put("b", b"2").unwrap();
        }

        let store = FileStore::open(temp_dir.path(), false).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.get("b").unwrap(), Some(b"2".to_vec()));
    }
}
