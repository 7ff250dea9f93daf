//! Range-scan cursors

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::errors::{StoreError, StoreResult};

/// A key and its raw stored bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub key: String,
    pub value: Vec<u8>,
}

/// One advance of a cursor.
///
/// `entry` may be absent on a step that is not `done`; consumers must
/// tolerate both empty steps and a final step that still carries an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorStep {
    pub entry: Option<StateEntry>,
    pub done: bool,
}

impl CursorStep {
    /// A step carrying an entry
    pub fn entry(entry: StateEntry) -> Self {
        Self {
            entry: Some(entry),
            done: false,
        }
    }

    /// The terminal step
    pub fn done() -> Self {
        Self {
            entry: None,
            done: true,
        }
    }
}

/// Single-pass handle over a range scan. Must be closed after use.
pub trait StateCursor {
    /// Advance by one element
    fn next(&mut self) -> StoreResult<CursorStep>;

    /// Release the cursor. Closing twice is an error.
    fn close(&mut self) -> StoreResult<()>;
}

/// Open/close counters shared between a store and its cursors
#[derive(Debug, Default)]
pub struct CursorStats {
    opened: AtomicU64,
    closed: AtomicU64,
}

impl CursorStats {
    /// Cursors opened so far
    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::Relaxed)
    }

    /// Cursors closed so far
    pub fn closed(&self) -> u64 {
        self.closed.load(Ordering::Relaxed)
    }

    /// Cursors opened but not yet closed
    pub fn open(&self) -> u64 {
        self.opened().saturating_sub(self.closed())
    }
}

/// Cursor over entries captured when the scan was opened.
///
/// Writes made after the scan opened are not visible through it.
#[derive(Debug)]
pub struct SnapshotCursor {
    entries: VecDeque<StateEntry>,
    closed: bool,
    stats: Arc<CursorStats>,
}

impl SnapshotCursor {
    /// Open a cursor over the given entries, already in scan order
    pub fn new(entries: Vec<StateEntry>, stats: Arc<CursorStats>) -> Self {
        stats.opened.fetch_add(1, Ordering::Relaxed);
        Self {
            entries: entries.into(),
            closed: false,
            stats,
        }
    }
}

impl StateCursor for SnapshotCursor {
    fn next(&mut self) -> StoreResult<CursorStep> {
        if self.closed {
            return Err(StoreError::CursorClosed);
        }
        Ok(match self.entries.pop_front() {
            Some(entry) => CursorStep::entry(entry),
            None => CursorStep::done(),
        })
    }

    fn close(&mut self) -> StoreResult<()> {
        if self.closed {
            return Err(StoreError::CursorClosed);
        }
        self.closed = true;
        self.entries.clear();
        self.stats.closed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
