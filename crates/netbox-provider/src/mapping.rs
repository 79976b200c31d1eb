//! Conversions between API payloads, requests and resource state
//!
//! Request side: [`RequestBody`] encodes the null/unknown rules once. A null
//! text attribute is sent as `""` so NetBox clears it; a null nullable
//! attribute is sent as JSON `null`; unknown attributes are left out so
//! NetBox applies its own default.
//!
//! State side: the `*_from_api` helpers turn API values back into
//! [`Value`]s, mapping NetBox's empty strings to null unless the user
//! wrote `""` themselves.

use crate::error::ProviderError;
use crate::lookup::{self, LookupTarget};
use crate::value::Value;
use netbox_client::{Choice, NetBoxApi};
use serde::Serialize;
use serde_json::{Map, Value as Json};

/// JSON body of a create/update request
#[derive(Debug, Default)]
pub struct RequestBody {
    fields: Map<String, Json>,
}

impl RequestBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text field; null clears it with `""`
    pub fn text(&mut self, key: &str, value: &Value<String>) -> &mut Self {
        match value {
            Value::Known(v) => self.set(key, Json::String(v.clone())),
            Value::Null => self.set(key, Json::String(String::new())),
            Value::Unknown => self,
        }
    }

    /// Nullable field; null clears it with JSON `null`
    pub fn nullable<T: Serialize>(&mut self, key: &str, value: &Value<T>) -> Result<&mut Self, ProviderError> {
        Ok(match value {
            Value::Known(v) => self.set(key, serde_json::to_value(v)?),
            Value::Null => self.set(key, Json::Null),
            Value::Unknown => self,
        })
    }

    /// Field with a server default; only sent when known
    pub fn optional<T: Serialize>(&mut self, key: &str, value: &Value<T>) -> Result<&mut Self, ProviderError> {
        Ok(match value {
            Value::Known(v) => self.set(key, serde_json::to_value(v)?),
            _ => self,
        })
    }

    /// 32-bit integer field; null clears it
    pub fn int32(&mut self, key: &str, value: &Value<i64>) -> Result<&mut Self, ProviderError> {
        Ok(match value {
            Value::Known(v) => self.set(key, Json::from(safe_i32(key, *v)?)),
            Value::Null => self.set(key, Json::Null),
            Value::Unknown => self,
        })
    }

    /// 32-bit integer field with a server default; only sent when known
    pub fn optional_int32(&mut self, key: &str, value: &Value<i64>) -> Result<&mut Self, ProviderError> {
        Ok(match value {
            Value::Known(v) => self.set(key, Json::from(safe_i32(key, *v)?)),
            _ => self,
        })
    }

    /// Optional reference resolved to an ID; null clears it
    pub async fn reference(
        &mut self,
        api: &dyn NetBoxApi,
        target: &LookupTarget,
        key: &str,
        value: &Value<String>,
    ) -> Result<&mut Self, ProviderError> {
        let id = lookup::resolve_optional(api, target, key, value).await?;
        Ok(self.set(key, id.map_or(Json::Null, Json::from)))
    }

    /// Reference that must resolve to an ID
    pub async fn required_reference(
        &mut self,
        api: &dyn NetBoxApi,
        target: &LookupTarget,
        key: &str,
        value: &Value<String>,
    ) -> Result<&mut Self, ProviderError> {
        let id = lookup::resolve_required(api, target, key, value).await?;
        Ok(self.set(key, Json::from(id)))
    }

    pub fn set(&mut self, key: &str, value: Json) -> &mut Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn fields_mut(&mut self) -> &mut Map<String, Json> {
        &mut self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Json> {
        self.fields.get(key)
    }

    pub fn into_json(self) -> Json {
        Json::Object(self.fields)
    }
}

/// NetBox reports unset text as `""`
///
/// An empty API value reads back as null unless `current` (the plan on
/// create and update, prior state on read) already holds `""`.
pub fn string_from_api(current: &Value<String>, value: &str) -> Value<String> {
    if !value.is_empty() {
        return Value::known(value);
    }
    match current {
        Value::Known(held) if held.is_empty() => Value::known(""),
        _ => Value::Null,
    }
}

/// Nullable text field; API `null` and `""` both read back as unset
pub fn optional_string_from_api(current: &Value<String>, value: Option<&str>) -> Value<String> {
    string_from_api(current, value.unwrap_or_default())
}

/// Choice fields come back as `{"value", "label"}`; state keeps the value
pub fn choice_from_api(choice: Option<&Choice>) -> Value<String> {
    choice
        .and_then(Choice::value)
        .filter(|v| !v.is_empty())
        .map_or(Value::Null, Value::known)
}

/// Integer choice field (e.g. rack width)
pub fn int_choice_from_api(choice: Option<&Choice>) -> Value<i64> {
    choice
        .and_then(Choice::value)
        .and_then(|v| v.parse().ok())
        .into()
}

/// Write-only values are never returned; keep what state already holds
pub fn preserve_write_only(current: &Value<String>) -> Value<String> {
    current.clone().or_null()
}

/// Parse an identifier from state or an import string
pub fn parse_id(raw: &str) -> Result<i32, ProviderError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ProviderError::InvalidId(raw.to_string()))
}

/// Narrow a 64-bit attribute to the 32-bit field NetBox stores
pub fn safe_i32(attribute: &str, value: i64) -> Result<i32, ProviderError> {
    i32::try_from(value).map_err(|_| ProviderError::IntegerOverflow {
        attribute: attribute.to_string(),
        value,
    })
}

/// String ID of a model, as required by every operation but Create
pub fn model_id(id: &Value<String>) -> Result<i32, ProviderError> {
    match id {
        Value::Known(raw) => parse_id(raw),
        _ => Err(ProviderError::InvalidId("<unset>".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_null_clears_with_empty_string() {
        let mut body = RequestBody::new();
        body.text("description", &Value::Null)
            .text("label", &Value::known("x"))
            .text("comments", &Value::Unknown);
        assert_eq!(body.into_json(), json!({"description": "", "label": "x"}));
    }

    #[test]
    fn test_nullable_and_optional() {
        let mut body = RequestBody::new();
        body.nullable("length", &Value::<f64>::Null).unwrap();
        body.optional("status", &Value::<String>::Null).unwrap();
        body.optional("enabled", &Value::Known(true)).unwrap();
        assert_eq!(body.into_json(), json!({"length": null, "enabled": true}));
    }

    #[test]
    fn test_int32_overflow_is_rejected() {
        let mut body = RequestBody::new();
        let err = body.int32("u_height", &Value::Known(i64::from(i32::MAX) + 1)).unwrap_err();
        assert!(matches!(err, ProviderError::IntegerOverflow { .. }));
        assert!(body.int32("u_height", &Value::Known(42)).is_ok());
    }

    #[test]
    fn test_empty_api_string_is_null() {
        assert_eq!(string_from_api(&Value::Null, ""), Value::Null);
        assert_eq!(string_from_api(&Value::Unknown, ""), Value::Null);
        assert_eq!(string_from_api(&Value::known("old"), ""), Value::Null);
        assert_eq!(string_from_api(&Value::Null, "x"), Value::known("x"));
        assert_eq!(optional_string_from_api(&Value::Null, None), Value::Null);
    }

    #[test]
    fn test_configured_empty_string_is_kept() {
        assert_eq!(string_from_api(&Value::known(""), ""), Value::known(""));
        assert_eq!(optional_string_from_api(&Value::known(""), None), Value::known(""));
        assert_eq!(string_from_api(&Value::known(""), "set elsewhere"), Value::known("set elsewhere"));
    }

    #[test]
    fn test_choice_from_api() {
        let choice = Choice {
            value: "connected".to_string(),
            label: "Connected".to_string(),
        };
        assert_eq!(choice_from_api(Some(&choice)), Value::known("connected"));
        assert_eq!(choice_from_api(None), Value::Null);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(" 12 ").unwrap(), 12);
        assert!(parse_id("abc").is_err());
        assert!(parse_id("0").is_err());
        assert!(parse_id("99999999999").is_err());
    }

    #[test]
    fn test_write_only_preserved() {
        assert_eq!(preserve_write_only(&Value::known("s")), Value::known("s"));
        assert_eq!(preserve_write_only(&Value::Unknown), Value::Null);
    }
}
