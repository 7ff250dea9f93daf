//! Operation counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Relaxed atomics; exactness per counter, not across counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for every contract entry point and failure class
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    inits: AtomicU64,
    invocations: AtomicU64,
    gets: AtomicU64,
    puts: AtomicU64,
    deletes: AtomicU64,
    lists: AtomicU64,
    decode_errors: AtomicU64,
    encode_errors: AtomicU64,
    not_found_errors: AtomicU64,
    store_errors: AtomicU64,
    records_scanned: AtomicU64,
}

impl MetricsRegistry {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_inits(&self) {
        self.inits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_invocations(&self) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_gets(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_puts(&self) {
        self.puts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deletes(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lists(&self) {
        self.lists.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_decode_errors(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_encode_errors(&self) {
        self.encode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found_errors(&self) {
        self.not_found_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_errors(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Add the number of entries returned by a scan
    pub fn add_records_scanned(&self, count: u64) {
        self.records_scanned.fetch_add(count, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            inits: self.inits.load(Ordering::Relaxed),
            invocations: self.invocations.load(Ordering::Relaxed),
            gets: self.gets.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            lists: self.lists.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            encode_errors: self.encode_errors.load(Ordering::Relaxed),
            not_found_errors: self.not_found_errors.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
            records_scanned: self.records_scanned.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub inits: u64,
    pub invocations: u64,
    pub gets: u64,
    pub puts: u64,
    pub deletes: u64,
    pub lists: u64,
    pub decode_errors: u64,
    pub encode_errors: u64,
    pub not_found_errors: u64,
    pub store_errors: u64,
    pub records_scanned: u64,
}

impl MetricsSnapshot {
    /// Serialize as a single JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_registry_is_zero() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.invocations, 0);
        assert_eq!(snapshot.records_scanned, 0);
    }

    #[test]
    fn test_counters_and_json() {
        let registry = MetricsRegistry::new();
        registry.increment_invocations();
        registry.increment_puts();
        registry.increment_not_found_errors();
        registry.increment_encode_errors();
        registry.add_records_scanned(5);

        let parsed: serde_json::Value =
            serde_json::from_str(&registry.snapshot().to_json()).unwrap();
        assert_eq!(parsed["invocations"], 1);
        assert_eq!(parsed["puts"], 1);
        assert_eq!(parsed["not_found_errors"], 1);
        assert_eq!(parsed["encode_errors"], 1);
        assert_eq!(parsed["decode_errors"], 0);
        assert_eq!(parsed["records_scanned"], 5);
    }

    #[test]
    fn test_thread_safety() {
        let registry = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..100 {
                        reg.increment_invocations();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.snapshot().invocations, 800);
    }
}
