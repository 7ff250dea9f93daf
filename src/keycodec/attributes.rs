//! Attribute maps parsed from request arguments

use std::borrow::Cow;
use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name → JSON value, iterated in lexicographic field-name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, Value>);

impl AttributeMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the previous value if the name was present
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in lexicographic name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Field names in lexicographic order
    pub fn names(&self) -> btree_map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Re-serialize the map as a JSON object
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.0)
    }
}

impl FromIterator<(String, Value)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<serde_json::Map<String, Value>> for AttributeMap {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Text form of an attribute value inside a composite key.
///
/// Strings are used verbatim; any other value uses its compact JSON text,
/// so `30` becomes `"30"` and `true` becomes `"true"`.
pub fn attribute_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_iteration_is_lexicographic() {
        let mut attrs = AttributeMap::new();
        attrs.insert("zeta", json!(1));
        attrs.insert("alpha", json!(2));
        attrs.insert("mid", json!(3));

        let names: Vec<&str> = attrs.names().map(String::as_str).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_attribute_text() {
        assert_eq!(attribute_text(&json!("alice")), "alice");
        assert_eq!(attribute_text(&json!(30)), "30");
        assert_eq!(attribute_text(&json!(true)), "true");
        assert_eq!(attribute_text(&Value::Null), "null");
        assert_eq!(attribute_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_json_bytes_parse_back_to_same_object() {
        let attrs: AttributeMap =
            serde_json::from_str(r#"{"username": "alice", "age": 30}"#).unwrap();
        let bytes = attrs.to_json_bytes().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"username": "alice", "age": 30}));
    }
}
