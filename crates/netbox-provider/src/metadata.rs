//! Tags and custom fields
//!
//! Nearly every NetBox model carries `tags` and `custom_fields`. Both are
//! modelled as sets in state. Tags are fully owned by configuration. Custom
//! fields are only partially owned: NetBox may hold fields the user never
//! declared, so reads keep just the declared names and updates merge the
//! declared values over what was last known.

use crate::error::ProviderError;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as Json};
use std::collections::BTreeSet;

/// A tag reference
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TagModel {
    pub name: String,
    pub slug: String,
}

/// A custom field value, string-encoded according to its type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomFieldModel {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: String,
}

impl CustomFieldModel {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            value: value.into(),
        }
    }

    /// JSON value NetBox expects for this field
    pub fn to_api(&self) -> Result<Json, ProviderError> {
        let attribute = || format!("custom_fields.{}", self.name);
        let raw = self.value.trim();
        if raw.is_empty() {
            return Ok(Json::Null);
        }
        Ok(match self.field_type.as_str() {
            "integer" | "object" => json!(raw.parse::<i64>().map_err(|e| {
                ProviderError::validation(attribute(), format!("{:?} is not an integer: {}", raw, e))
            })?),
            "decimal" => json!(raw.parse::<f64>().map_err(|e| {
                ProviderError::validation(attribute(), format!("{:?} is not a number: {}", raw, e))
            })?),
            "boolean" => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" => json!(true),
                "false" | "0" => json!(false),
                _ => {
                    return Err(ProviderError::validation(
                        attribute(),
                        format!("{:?} is not a boolean", raw),
                    ));
                }
            },
            "date" => {
                chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    ProviderError::validation(attribute(), format!("{:?} is not a YYYY-MM-DD date: {}", raw, e))
                })?;
                json!(raw)
            }
            "json" => serde_json::from_str(raw).map_err(|e| {
                ProviderError::validation(attribute(), format!("invalid JSON: {}", e))
            })?,
            "multiselect" => json!(split_list(raw)),
            "multiobject" => {
                let ids = split_list(raw)
                    .into_iter()
                    .map(|id| id.parse::<i64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| ProviderError::validation(attribute(), format!("object IDs must be integers: {}", e)))?;
                json!(ids)
            }
            _ => json!(self.value),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// String encoding of an API value for a field of `field_type`
pub fn format_api_value(field_type: &str, value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::String(s) if field_type != "json" => s.clone(),
        Json::Array(items) if field_type != "json" => items
            .iter()
            .map(|item| match item {
                Json::String(s) => s.clone(),
                Json::Object(o) => o.get("id").map_or_else(|| item.to_string(), ToString::to_string),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(","),
        Json::Object(o) if field_type == "object" => {
            o.get("id").map_or_else(|| value.to_string(), ToString::to_string)
        }
        Json::Number(_) | Json::Bool(_) if field_type != "json" => value.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Custom fields as a request map
pub fn custom_fields_to_map(fields: &BTreeSet<CustomFieldModel>) -> Result<Map<String, Json>, ProviderError> {
    fields
        .iter()
        .map(|field| Ok((field.name.clone(), field.to_api()?)))
        .collect()
}

/// Tags and custom fields of a resource model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub tags: Value<BTreeSet<TagModel>>,
    #[serde(default)]
    pub custom_fields: Value<BTreeSet<CustomFieldModel>>,
}

impl Metadata {
    fn apply_tags(&self, body: &mut Map<String, Json>) {
        match &self.tags {
            Value::Known(tags) => {
                let tags: Vec<Json> = tags.iter().map(|t| json!({"name": t.name, "slug": t.slug})).collect();
                body.insert("tags".to_string(), Json::Array(tags));
            }
            Value::Null => {
                body.insert("tags".to_string(), json!([]));
            }
            Value::Unknown => {}
        }
    }

    /// Add tags and custom fields to a create request
    ///
    /// Undeclared custom fields are left to NetBox's defaults.
    pub fn apply_create(&self, body: &mut Map<String, Json>) -> Result<(), ProviderError> {
        self.apply_tags(body);
        if let Value::Known(fields) = &self.custom_fields {
            if !fields.is_empty() {
                body.insert("custom_fields".to_string(), Json::Object(custom_fields_to_map(fields)?));
            }
        }
        Ok(())
    }

    /// Add tags and merged custom fields to an update request
    ///
    /// - plan null: resend the prior values
    /// - plan empty: send `{}`
    /// - otherwise: prior values overlaid with the planned ones
    pub fn apply_update(&self, prior: &Metadata, body: &mut Map<String, Json>) -> Result<(), ProviderError> {
        self.apply_tags(body);

        let prior_map = match &prior.custom_fields {
            Value::Known(fields) => Some(custom_fields_to_map(fields)?),
            _ => None,
        };
        let merged = match (&self.custom_fields, prior_map) {
            (Value::Known(planned), _) if planned.is_empty() => Some(Map::new()),
            (Value::Known(planned), prior_map) => {
                let mut merged = prior_map.unwrap_or_default();
                merged.extend(custom_fields_to_map(planned)?);
                Some(merged)
            }
            (_, prior_map) => prior_map,
        };
        if let Some(merged) = merged {
            body.insert("custom_fields".to_string(), Json::Object(merged));
        }
        Ok(())
    }

    /// Refresh from an API object
    pub fn read_back(&mut self, api: &Json) {
        self.tags = tags_from_api(api.get("tags"), &self.tags);
        self.custom_fields = custom_fields_from_api(api.get("custom_fields"), &self.custom_fields);
    }
}

/// Tags reported by NetBox; an empty list stays empty only if configured so
pub fn tags_from_api(api: Option<&Json>, current: &Value<BTreeSet<TagModel>>) -> Value<BTreeSet<TagModel>> {
    let tags: BTreeSet<TagModel> = api
        .and_then(Json::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|t| {
                    Some(TagModel {
                        name: t.get("name")?.as_str()?.to_string(),
                        slug: t.get("slug")?.as_str()?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    if tags.is_empty() && !matches!(current, Value::Known(c) if c.is_empty()) {
        Value::Null
    } else {
        Value::Known(tags)
    }
}

/// Custom fields reported by NetBox, filtered to the declared names
pub fn custom_fields_from_api(
    api: Option<&Json>,
    current: &Value<BTreeSet<CustomFieldModel>>,
) -> Value<BTreeSet<CustomFieldModel>> {
    let Value::Known(owned) = current else {
        return Value::Null;
    };
    let api = api.and_then(Json::as_object);

    Value::Known(
        owned
            .iter()
            .map(|field| {
                let reported = api.and_then(|m| m.get(&field.name)).unwrap_or(&Json::Null);
                // keep the user's spelling when it encodes the same value
                let unchanged = field.to_api().is_ok_and(|desired| &desired == reported);
                let value = if unchanged {
                    field.value.clone()
                } else {
                    format_api_value(&field.field_type, reported)
                };
                CustomFieldModel::new(field.name.clone(), field.field_type.clone(), value)
            })
            .collect(),
    )
}
