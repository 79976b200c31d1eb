//! Tri-state attribute values
//!
//! The host distinguishes an attribute the user left out (`Null`) from one
//! whose value is only known after apply (`Unknown`). Both are distinct from
//! any concrete value, including the empty string.
//!
//! On the wire `Unknown` is the object `{"$unknown": true}`; everything else is
//! plain JSON.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key of the JSON marker standing in for an unknown value
pub const UNKNOWN_KEY: &str = "$unknown";

/// JSON form of an unknown value
pub fn unknown_json() -> serde_json::Value {
    serde_json::json!({ UNKNOWN_KEY: true })
}

/// Whether a JSON value is the unknown marker
pub fn is_unknown_json(value: &serde_json::Value) -> bool {
    value
        .as_object()
        .is_some_and(|o| o.len() == 1 && o.get(UNKNOWN_KEY) == Some(&serde_json::Value::Bool(true)))
}

/// Attribute value as seen by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value<T> {
    #[default]
    Null,
    Unknown,
    Known(T),
}

impl<T> Value<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Value::Known(_))
    }

    /// Null or unknown
    pub fn is_unset(&self) -> bool {
        !self.is_known()
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Value<&T> {
        match self {
            Value::Null => Value::Null,
            Value::Unknown => Value::Unknown,
            Value::Known(v) => Value::Known(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Value<U> {
        match self {
            Value::Null => Value::Null,
            Value::Unknown => Value::Unknown,
            Value::Known(v) => Value::Known(f(v)),
        }
    }

    /// Replace an unknown value with null; known and null pass through
    pub fn or_null(self) -> Value<T> {
        match self {
            Value::Unknown => Value::Null,
            other => other,
        }
    }
}

impl Value<String> {
    /// Known value as `&str`
    pub fn as_str(&self) -> Option<&str> {
        self.as_known().map(String::as_str)
    }

    pub fn known(value: impl Into<String>) -> Self {
        Value::Known(value.into())
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Value::Known)
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Unknown => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(UNKNOWN_KEY, &true)?;
                map.end()
            }
            Value::Known(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Value<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        if is_unknown_json(&raw) {
            return Ok(Value::Unknown);
        }
        serde_json::from_value(raw).map(Value::Known).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Model {
        #[serde(default)]
        name: Value<String>,
        #[serde(default)]
        size: Value<i64>,
    }

    #[test]
    fn test_three_states_decode() {
        let m: Model = serde_json::from_value(json!({"name": "", "size": {"$unknown": true}})).unwrap();
        assert_eq!(m.name, Value::known(""));
        assert!(m.size.is_unknown());

        let m: Model = serde_json::from_value(json!({})).unwrap();
        assert!(m.name.is_null());
    }

    #[test]
    fn test_unknown_encodes_as_marker() {
        let m = Model {
            name: Value::Unknown,
            size: Value::Known(3),
        };
        assert_eq!(serde_json::to_value(&m).unwrap(), json!({"name": {"$unknown": true}, "size": 3}));
    }

    #[test]
    fn test_or_null_and_option_conversion() {
        assert_eq!(Value::<i64>::Unknown.or_null(), Value::Null);
        assert_eq!(Value::from(Some(4)), Value::Known(4));
        assert_eq!(Value::<i64>::from(None), Value::Null);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let res: Result<Model, _> = serde_json::from_value(json!({"size": "big"}));
        assert!(res.is_err());
    }
}
