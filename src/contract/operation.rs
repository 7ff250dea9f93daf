//! Named operation table
//!
//! Invoke routes by function name through a closed set of operations.
//! Unknown names are rejected with `NotFound`; nothing is looked up
//! dynamically.

use super::context::InvocationContext;
use super::errors::{ContractError, ContractResult};
use super::handlers;
use crate::keycodec::AttributeMap;
use crate::store::RecordStore;

/// Operations reachable through Invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Put,
    Delete,
    List,
}

impl Operation {
    /// Every bound operation, in a stable order
    pub const ALL: [Operation; 4] = [
        Operation::Get,
        Operation::Put,
        Operation::Delete,
        Operation::List,
    ];

    /// Function name the operation is bound to
    pub fn name(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Put => "put",
            Operation::Delete => "delete",
            Operation::List => "list",
        }
    }

    /// Resolve a function name. Names are case-sensitive.
    pub fn from_name(name: &str) -> ContractResult<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| ContractError::not_found(name))
    }

    /// Run the bound handler
    pub fn execute<S: RecordStore + ?Sized>(
        self,
        ctx: &mut InvocationContext<'_, S>,
        attrs: &AttributeMap,
    ) -> ContractResult<Vec<u8>> {
        match self {
            Operation::Get => {
                ctx.metrics.increment_gets();
                handlers::get(ctx, attrs)
            }
            Operation::Put => {
                ctx.metrics.increment_puts();
                handlers::put(ctx, attrs)
            }
            Operation::Delete => {
                ctx.metrics.increment_deletes();
                handlers::delete(ctx, attrs)
            }
            Operation::List => {
                ctx.metrics.increment_lists();
                handlers::list(ctx, attrs)
            }
        }
    }
}
