//! Observable events
//!
//! Events are explicit and typed; the string form is what appears in the
//! `event` field of a log line.

/// Observable events in the contract runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Store opened, ready to serve
    BootComplete,
    /// Configuration loaded
    ConfigLoaded,
    /// State store opened
    StoreOpened,
    /// Shutdown complete
    ShutdownComplete,

    // Contract
    /// Init wrote its record
    InitComplete,
    /// Init failed
    InitFailed,
    /// Invoke handler returned successfully
    InvokeComplete,
    /// Invoke failed and produced an error envelope
    InvokeFailed,
    /// A state read/write/delete was issued
    StateAccess,
    /// Scan cursor drained
    ScanComplete,
    /// Releasing a scan cursor failed
    CursorCloseFailed,
    /// A failed append could not be cut back out of the state log
    StateLogRollbackFailed,

    // Serving
    /// Serve loop received an unparseable request line
    RequestRejected,
    /// Counter snapshot at shutdown
    MetricsSnapshot,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "LEDGERKV_STARTUP_BEGIN",
            Event::BootComplete => "LEDGERKV_STARTUP_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::InitComplete => "INIT_COMPLETE",
            Event::InitFailed => "INIT_FAILED",
            Event::InvokeComplete => "INVOKE_COMPLETE",
            Event::InvokeFailed => "INVOKE_FAILED",
            Event::StateAccess => "STATE_ACCESS",
            Event::ScanComplete => "SCAN_COMPLETE",
            Event::CursorCloseFailed => "CURSOR_CLOSE_FAILED",
            Event::StateLogRollbackFailed => "STATE_LOG_ROLLBACK_FAILED",

            Event::RequestRejected => "REQUEST_REJECTED",
            Event::MetricsSnapshot => "METRICS_SNAPSHOT",
        }
    }

    /// Whether the event represents a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::InitFailed
                | Event::InvokeFailed
                | Event::CursorCloseFailed
                | Event::StateLogRollbackFailed
                | Event::RequestRejected
        )
    }
}
