//! Store-native composite key encoding
//!
//! ```text
//! U+0000 object_type U+0000 attr_1 U+0000 ... attr_n U+0000
//! ```
//!
//! A partial key (fewer attributes) is a strict prefix of every full key
//! that shares its leading components, which is what prefix scans rely on.

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use crate::keycodec::attribute_text;

/// Separator between composite key components
pub const COMPOSITE_KEY_SEPARATOR: char = '\u{0}';

/// Highest code point; reserved as a range-scan upper bound
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Encode an object type and attribute values into a composite key.
///
/// Fails with `InvalidKey` if any component contains U+0000 or U+10FFFF.
pub fn encode_composite_key(object_type: &str, attributes: &[Value]) -> StoreResult<String> {
    validate_component(object_type)?;

    let mut key = String::with_capacity(object_type.len() + 2 + attributes.len() * 8);
    key.push(COMPOSITE_KEY_SEPARATOR);
    key.push_str(object_type);
    key.push(COMPOSITE_KEY_SEPARATOR);

    for attribute in attributes {
        let text = attribute_text(attribute);
        validate_component(&text)?;
        key.push_str(&text);
        key.push(COMPOSITE_KEY_SEPARATOR);
    }

    Ok(key)
}

fn validate_component(component: &str) -> StoreResult<()> {
    if component.contains(COMPOSITE_KEY_SEPARATOR) {
        return Err(StoreError::invalid_key(format!(
            "component {:?} contains U+0000",
            component
        )));
    }
    if component.contains(MAX_UNICODE_RUNE) {
        return Err(StoreError::invalid_key(format!(
            "component {:?} contains U+10FFFF",
            component
        )));
    }
    Ok(())
}
