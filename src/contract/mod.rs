//! Contract layer
//!
//! Exposes two entry points over a [`RecordStore`](crate::store::RecordStore):
//!
//! - `init`: decode argument 0 and write it as a record
//! - `invoke`: route a function name to `get`, `put`, `delete`, or `list`
//!
//! All outcomes leave through a [`Response`] envelope.

mod aggregator;
mod context;
mod dispatcher;
mod errors;
mod handlers;
mod operation;
mod request;
mod response;

pub use aggregator::{decode_value, drain_cursor, encode_entries, QueryEntry};
pub use context::InvocationContext;
pub use dispatcher::Dispatcher;
pub use errors::{ContractError, ContractResult};
pub use handlers::{delete, get, list, put};
pub use operation::Operation;
pub use request::{decode_attributes, Entry, Invocation};
pub use response::{ErrorResponse, Response, SuccessResponse};
