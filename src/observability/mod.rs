//! Observability for the contract runtime
//!
//! - Structured JSON-lines logging to stderr
//! - Typed lifecycle and contract events
//! - Monotonic operation counters
//!
//! Observability is read-only: a logging failure never changes the outcome
//! of the operation being logged.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a typed event; failures at ERROR, everything else at INFO
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_does_not_panic() {
        log_event(Event::BootStart, &[]);
        log_event(Event::InvokeFailed, &[("function", "nope")]);
    }
}
