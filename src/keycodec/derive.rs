//! Simple and composite key derivation

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::attributes::{attribute_text, AttributeMap};
use crate::store::{RecordStore, StoreResult};

/// Field whose value becomes the composite key's object type
pub const OBJECT_TYPE_FIELD: &str = "username";

/// Key used for an empty attribute map
pub const UNDEFINED_KEY: &str = "undefined";

/// Partition label plus ordered attribute values for a composite key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeKeyDescriptor {
    /// Value of the `username` field, or empty when absent
    pub object_type: String,
    /// Remaining field values in lexicographic field-name order
    pub attributes: Vec<Value>,
}

impl CompositeKeyDescriptor {
    /// Create a descriptor directly
    pub fn new(object_type: impl Into<String>, attributes: Vec<Value>) -> Self {
        Self {
            object_type: object_type.into(),
            attributes,
        }
    }
}

/// Address of a record in the state store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKey {
    /// Empty attribute map
    Undefined,
    /// Single-field map, keyed by the field name
    Field(String),
    /// Store-native composite key encoding
    Composite(String),
}

impl StorageKey {
    /// The key as the store sees it
    pub fn as_str(&self) -> &str {
        match self {
            StorageKey::Undefined => UNDEFINED_KEY,
            StorageKey::Field(name) => name,
            StorageKey::Composite(encoded) => encoded,
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Composite keys contain U+0000 separators
        write!(f, "{}", self.as_str().escape_debug())
    }
}

/// Partition an attribute map into a composite key descriptor.
///
/// `username` becomes the object type (empty if absent); every other value
/// follows in lexicographic field-name order. Values are not validated.
pub fn derive_composite_key(attrs: &AttributeMap) -> CompositeKeyDescriptor {
    let mut object_type = String::new();
    let mut attributes = Vec::with_capacity(attrs.len());

    for (name, value) in attrs {
        if name == OBJECT_TYPE_FIELD {
            object_type = attribute_text(value).into_owned();
        } else {
            attributes.push(value.clone());
        }
    }

    CompositeKeyDescriptor {
        object_type,
        attributes,
    }
}

/// Derive the storage key for an attribute map.
///
/// - zero fields: [`UNDEFINED_KEY`]
/// - one field: the field's *name*
/// - two or more: the store's encoding of [`derive_composite_key`]
pub fn derive_storage_key<S>(store: &S, attrs: &AttributeMap) -> StoreResult<StorageKey>
where
    S: RecordStore + ?Sized,
{
    match attrs.len() {
        0 => Ok(StorageKey::Undefined),
        1 => {
            let name = attrs.names().next().cloned().unwrap_or_default();
            Ok(StorageKey::Field(name))
        }
        _ => {
            let descriptor = derive_composite_key(attrs);
            store
                .encode_composite_key(&descriptor)
                .map(StorageKey::Composite)
        }
    }
}
