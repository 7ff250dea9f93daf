//! Entry points: Init and Invoke
//!
//! Flow for every request:
//! 1. Resolve the operation (Invoke only)
//! 2. Decode argument 0 into an attribute map
//! 3. Run the handler against the store
//! 4. Wrap the outcome in a response envelope
//!
//! No error escapes as a panic or transport fault: every failure becomes an
//! error envelope.

use std::sync::Arc;

use super::context::InvocationContext;
use super::errors::{ContractError, ContractResult};
use super::operation::Operation;
use super::request::{decode_attributes, Entry, Invocation};
use super::response::Response;
use crate::keycodec::derive_storage_key;
use crate::observability::{log_event, Event, MetricsRegistry};
use crate::store::RecordStore;

/// Routes requests to handlers over an owned store
pub struct Dispatcher<S: RecordStore> {
    store: S,
    metrics: Arc<MetricsRegistry>,
}

impl<S: RecordStore> Dispatcher<S> {
    /// Create a dispatcher with its own counters
    pub fn new(store: S) -> Self {
        Self::with_metrics(store, Arc::new(MetricsRegistry::new()))
    }

    /// Create a dispatcher reporting to shared counters
    pub fn with_metrics(store: S, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Route a parsed request to its entry point
    pub fn handle(&mut self, request: &Invocation) -> Response {
        match request.entry {
            Entry::Init => self.init(&request.args),
            Entry::Invoke => self.invoke(&request.function, &request.args),
        }
    }

    /// Decode argument 0 and write it as a new record
    pub fn init(&mut self, args: &[String]) -> Response {
        self.metrics.increment_inits();
        let mut ctx = InvocationContext::new(&mut self.store, &self.metrics);
        let tx_id = ctx.tx_id_string();

        let result = Self::run_init(&mut ctx, args);
        match &result {
            Ok(_) => log_event(Event::InitComplete, &[("tx_id", &tx_id)]),
            Err(err) => {
                record_failure(&self.metrics, err);
                log_event(
                    Event::InitFailed,
                    &[("code", err.code()), ("reason", &err.to_string()), ("tx_id", &tx_id)],
                );
            }
        }
        Response::from_result(result)
    }

    fn run_init(ctx: &mut InvocationContext<'_, S>, args: &[String]) -> ContractResult<Vec<u8>> {
        let attrs = decode_attributes(args)?;
        let key = derive_storage_key(&*ctx.store, &attrs)?;
        let value = attrs
            .to_json_bytes()
            .map_err(|e| ContractError::Encode(e.to_string()))?;
        ctx.store.put(key.as_str(), &value)?;
        Ok(Vec::new())
    }

    /// Resolve `function`, decode argument 0, and run the bound handler
    pub fn invoke(&mut self, function: &str, args: &[String]) -> Response {
        self.metrics.increment_invocations();
        let mut ctx = InvocationContext::new(&mut self.store, &self.metrics);
        let tx_id = ctx.tx_id_string();

        let result = Operation::from_name(function)
            .and_then(|op| decode_attributes(args).map(|attrs| (op, attrs)))
            .and_then(|(op, attrs)| op.execute(&mut ctx, &attrs));

        match &result {
            Ok(payload) => log_event(
                Event::InvokeComplete,
                &[
                    ("function", function),
                    ("payload_bytes", &payload.len().to_string()),
                    ("tx_id", &tx_id),
                ],
            ),
            Err(err) => {
                record_failure(&self.metrics, err);
                log_event(
                    Event::InvokeFailed,
                    &[
                        ("code", err.code()),
                        ("function", function),
                        ("reason", &err.to_string()),
                        ("tx_id", &tx_id),
                    ],
                );
            }
        }
        Response::from_result(result)
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the underlying store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the dispatcher, returning the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Counters this dispatcher reports to
    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }
}

fn record_failure(metrics: &MetricsRegistry, err: &ContractError) {
    match err {
        ContractError::Decode(_) => metrics.increment_decode_errors(),
        ContractError::Encode(_) => metrics.increment_encode_errors(),
        ContractError::NotFound(_) => metrics.increment_not_found_errors(),
        ContractError::Store(_) => metrics.increment_store_errors(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn args(raw: &str) -> Vec<String> {
        vec![raw.to_string()]
    }

    #[test]
    fn test_init_writes_record() {
        let mut dispatcher = Dispatcher::new(MemoryStore::new());
        let resp = dispatcher.init(&args(r#"{"username":"alice","age":30}"#));
        assert_eq!(resp, Response::ok());
        assert_eq!(dispatcher.store().len(), 1);
        assert_eq!(dispatcher.metrics().snapshot().inits, 1);
    }

    #[test]
    fn test_init_malformed_json() {
        let mut dispatcher = Dispatcher::new(MemoryStore::new());
        let resp = dispatcher.init(&args("{oops"));
        assert_eq!(resp.error_code(), Some("LEDGERKV_DECODE_ERROR"));
        assert!(dispatcher.store().is_empty());
    }

    #[test]
    fn test_unknown_function_checked_before_argument() {
        let mut dispatcher = Dispatcher::new(MemoryStore::new());
        let resp = dispatcher.invoke("transfer", &args("{oops"));
        assert_eq!(resp.error_code(), Some("LEDGERKV_NOT_FOUND"));
        assert!(resp.error_message().unwrap().contains("transfer"));
        assert_eq!(dispatcher.metrics().snapshot().not_found_errors, 1);
    }

    #[test]
    fn test_handle_routes_by_entry() {
        let mut dispatcher = Dispatcher::new(MemoryStore::new());
        let resp = dispatcher.handle(&Invocation::init(r#"{"k":"v"}"#));
        assert!(resp.is_success());

        let resp = dispatcher.handle(&Invocation::invoke("get", args(r#"{"k":0}"#)));
        assert_eq!(resp.payload(), Some(br#"{"k":"v"}"#.as_slice()));
    }

    #[test]
    fn test_store_error_becomes_envelope() {
        let mut dispatcher = Dispatcher::new(MemoryStore::new());
        let resp = dispatcher.invoke("put", &args(r#"{"username":"a\u0000b","x":1}"#));
        assert_eq!(resp.error_code(), Some("LEDGERKV_STORE_ERROR"));
        assert_eq!(dispatcher.metrics().snapshot().store_errors, 1);
    }

    #[test]
    fn test_failures_counted_by_class() {
        let metrics = MetricsRegistry::new();
        record_failure(&metrics, &ContractError::Encode("unserializable".to_string()));
        record_failure(&metrics, &ContractError::decode("bad json"));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.encode_errors, 1);
        assert_eq!(snapshot.decode_errors, 1);
        assert_eq!(snapshot.store_errors, 0);
    }
}
