//! Store selected by configuration

use crate::keycodec::CompositeKeyDescriptor;
use crate::store::{FileStore, MemoryStore, RecordStore, SnapshotCursor, StoreResult};

use super::config::{BackendKind, Config};
use super::errors::{CliError, CliResult};

/// Either backend, chosen at boot
#[derive(Debug)]
pub enum ConfiguredStore {
    Memory(MemoryStore),
    File(FileStore),
}

impl ConfiguredStore {
    /// Open the backend named by `config`
    pub fn open(config: &Config) -> CliResult<Self> {
        match config.backend {
            BackendKind::Memory => Ok(ConfiguredStore::Memory(MemoryStore::new())),
            BackendKind::File => {
                let data_dir = config
                    .data_path()
                    .ok_or_else(|| CliError::config_error("data_dir is not set"))?;
                Ok(ConfiguredStore::File(FileStore::open(data_dir, config.sync_writes)?))
            }
        }
    }

    /// Backend name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ConfiguredStore::Memory(_) => "memory",
            ConfiguredStore::File(_) => "file",
        }
    }

    /// Live record count
    pub fn len(&self) -> usize {
        match self {
            ConfiguredStore::Memory(s) => s.len(),
            ConfiguredStore::File(s) => s.len(),
        }
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for ConfiguredStore {
    type Cursor = SnapshotCursor;

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        match self {
            ConfiguredStore::Memory(s) => s.get(key),
            ConfiguredStore::File(s) => s.get(key),
        }
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        match self {
            ConfiguredStore::Memory(s) => s.put(key, value),
            ConfiguredStore::File(s) => s.put(key, value),
        }
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        match self {
            ConfiguredStore::Memory(s) => s.delete(key),
            ConfiguredStore::File(s) => s.delete(key),
        }
    }

    fn scan_by_composite_prefix(
        &mut self,
        descriptor: &CompositeKeyDescriptor,
    ) -> StoreResult<SnapshotCursor> {
        match self {
            ConfiguredStore::Memory(s) => s.scan_by_composite_prefix(descriptor),
            ConfiguredStore::File(s) => s.scan_by_composite_prefix(descriptor),
        }
    }
}
