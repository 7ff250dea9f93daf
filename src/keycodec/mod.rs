//! Key derivation for ledger records
//!
//! Every record is addressed by a key computed from the request's attribute
//! map. Two addressing schemes exist:
//!
//! - Simple keys: a single-field map is keyed by the field *name*, not its
//!   value. `{"color": "red"}` and `{"color": "blue"}` both address `color`.
//! - Composite keys: maps with two or more fields are partitioned into an
//!   object type (the `username` field) plus the remaining values in
//!   lexicographic field-name order, then rendered by the store.
//!
//! The empty map addresses the fixed `undefined` key.
//!
//! # Determinism
//!
//! Field order is structural: `AttributeMap` is backed by a `BTreeMap`, so
//! derivation never depends on the order fields were inserted or parsed.

mod attributes;
mod derive;

pub use attributes::{attribute_text, AttributeMap};
pub use derive::{
    derive_composite_key, derive_storage_key, CompositeKeyDescriptor, StorageKey,
    OBJECT_TYPE_FIELD, UNDEFINED_KEY,
};
