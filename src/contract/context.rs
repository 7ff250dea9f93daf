//! Per-invocation context handed to every handler

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::observability::MetricsRegistry;
use crate::store::RecordStore;

/// Explicit state for one invocation: the store it may touch, the counters
/// it reports to, and an identifier that ties its log lines together.
pub struct InvocationContext<'a, S: RecordStore + ?Sized> {
    pub store: &'a mut S,
    pub metrics: &'a MetricsRegistry,
    pub tx_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl<'a, S: RecordStore + ?Sized> InvocationContext<'a, S> {
    /// Open a context with a fresh transaction id
    pub fn new(store: &'a mut S, metrics: &'a MetricsRegistry) -> Self {
        Self {
            store,
            metrics,
            tx_id: Uuid::new_v4(),
            timestamp: Utc::now(),
        }
    }

    /// Transaction id as a log field value
    pub fn tx_id_string(&self) -> String {
        self.tx_id.to_string()
    }
}
