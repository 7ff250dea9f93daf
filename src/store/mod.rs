//! Ordered state store contract
//!
//! The contract layer never touches persisted bytes directly. It consumes a
//! [`RecordStore`]: point get/put/delete, composite key encoding, and prefix
//! scans that hand back a [`StateCursor`].
//!
//! Two backends implement the contract:
//!
//! - [`MemoryStore`]: ordered in-memory map
//! - [`FileStore`]: append-only checksummed log replayed into an ordered
//!   index on open
//!
//! Both scan in lexicographic key order and treat delete of an absent key
//! as a no-op.

mod checksum;
mod composite;
mod cursor;
mod errors;
mod file;
mod memory;
mod record;

pub use checksum::{compute_checksum, verify_checksum};
pub use composite::{encode_composite_key, COMPOSITE_KEY_SEPARATOR, MAX_UNICODE_RUNE};
pub use cursor::{CursorStats, CursorStep, SnapshotCursor, StateCursor, StateEntry};
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{LogOp, LogRecord};

use crate::keycodec::CompositeKeyDescriptor;

/// Ordered key-value store backing all contract reads and writes.
///
/// Methods take `&mut self` for writes and scans, so one invocation holds
/// the store exclusively and its calls complete in issue order.
pub trait RecordStore {
    /// Cursor type returned by prefix scans
    type Cursor: StateCursor;

    /// Read a value; `None` if the key was never written or was deleted
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write a value, replacing any previous one
    fn put(&mut self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Remove a value; absent keys are not an error
    fn delete(&mut self, key: &str) -> StoreResult<()>;

    /// Render a descriptor as this store's native composite key
    fn encode_composite_key(&self, descriptor: &CompositeKeyDescriptor) -> StoreResult<String> {
        encode_composite_key(&descriptor.object_type, &descriptor.attributes)
    }

    /// Open a cursor over every record whose key starts with the
    /// descriptor's (partial) composite key
    fn scan_by_composite_prefix(
        &mut self,
        descriptor: &CompositeKeyDescriptor,
    ) -> StoreResult<Self::Cursor>;
}
