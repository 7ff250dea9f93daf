//! ledgerkv - a deterministic key-value contract over an ordered ledger
//! state store
//!
//! Records are JSON objects addressed by keys derived from their own
//! fields. `init` and `invoke` are the only entry points; every outcome is
//! returned as a success or error envelope.

pub mod cli;
pub mod contract;
pub mod keycodec;
pub mod observability;
pub mod store;
