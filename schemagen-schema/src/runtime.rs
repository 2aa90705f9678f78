//! Runtime accessor read by generated expand functions.
//!
//! Top-level expand functions take a [`ResourceData`]; nested ones take the
//! bare [`Value`] of one nested block. Both read missing keys as `Null`, which
//! the generated code turns into the field's default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Generic key/value representation of one resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceData {
    values: Map<String, Value>,
}

impl ResourceData {
    /// Creates resource data from a JSON object.
    #[must_use]
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Creates resource data from a JSON value.
    ///
    /// Returns `None` if the value is not an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self { values }),
            _ => None,
        }
    }

    /// Returns the value stored under `key`, or `Null` if there is none.
    #[must_use]
    pub fn get(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&NULL)
    }

    /// Stores a value under `key`, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Returns true if a value is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the underlying object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl From<Map<String, Value>> for ResourceData {
    fn from(values: Map<String, Value>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_key_reads_null() {
        let data = ResourceData::default();
        assert_eq!(data.get("absent"), &Value::Null);
        assert_eq!(data.get("absent")[0]["nested"], Value::Null);
        assert!(!data.contains("absent"));
    }

    #[test]
    fn test_from_value() {
        let data = ResourceData::from_value(json!({ "name": "dvs", "mtu": 9000 }))
            .expect("object value");
        assert_eq!(data.get("name").as_str(), Some("dvs"));
        assert_eq!(data.get("mtu").as_i64(), Some(9000));
        assert!(ResourceData::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn test_set_and_serialize() {
        let mut data = ResourceData::default();
        assert!(data.set("name", "dvs").is_none());
        assert_eq!(data.set("name", "vds"), Some(json!("dvs")));
        let text = serde_json::to_string(&data).expect("serialize");
        assert_eq!(text, r#"{"name":"vds"}"#);

        let back: ResourceData = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, data);
        assert_eq!(back.as_map().len(), 1);
    }
}
