//! Declarative resource schemas
//!
//! Each resource declares its attributes once; the same declaration drives
//! configuration validation (before any API call) and planning of computed
//! values. Schemas are also served to the host verbatim.

use crate::error::ProviderError;
use crate::value::{is_unknown_json, unknown_json};
use serde::Serialize;
use serde_json::{Map, Value as Json};

/// Attribute value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Int64,
    Float64,
    Bool,
    StringList,
    /// Set of `{name, slug}`
    Tags,
    /// Set of `{name, type, value}`
    CustomFields,
    /// List of `{object_type, object_id}`
    Terminations,
}

/// Extra checks applied to known values
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    OneOf(&'static [&'static str]),
    /// 6 hex digits, no leading `#`
    HexColor,
    /// `YYYY-MM-DD`
    Date,
    Range(i64, i64),
    /// Six colon- or hyphen-separated hex octets
    MacAddress,
}

/// One attribute of a resource schema
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub description: &'static str,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Json>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
    /// Carry the prior state value into the plan instead of marking it unknown
    pub use_state_for_unknown: bool,
    /// A change to this attribute destroys and recreates the object
    pub requires_replace: bool,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            default: None,
            validators: Vec::new(),
            use_state_for_unknown: false,
            requires_replace: false,
        }
    }

    pub fn required(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            required: true,
            ..Self::new(name, kind, description)
        }
    }

    pub fn optional(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            optional: true,
            ..Self::new(name, kind, description)
        }
    }

    /// Read-only attribute set by NetBox
    pub fn computed_only(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            computed: true,
            use_state_for_unknown: true,
            ..Self::new(name, kind, description)
        }
    }

    /// Optional attribute whose value NetBox fills in when omitted
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self.use_state_for_unknown = true;
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn default_value(mut self, value: Json) -> Self {
        self.default = Some(value);
        self.computed = true;
        self
    }

    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.validators.push(Validator::OneOf(values));
        self
    }

    pub fn validate_with(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    fn check_kind(&self, value: &Json) -> Result<(), ProviderError> {
        let ok = match self.kind {
            AttributeKind::String => value.is_string(),
            AttributeKind::Int64 => value.is_i64(),
            AttributeKind::Float64 => value.is_number(),
            AttributeKind::Bool => value.is_boolean(),
            AttributeKind::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Json::is_string)),
            AttributeKind::Tags => objects_with(value, &["name", "slug"]),
            AttributeKind::CustomFields => objects_with(value, &["name", "type", "value"]),
            AttributeKind::Terminations => objects_with(value, &["object_type", "object_id"]),
        };
        if ok {
            Ok(())
        } else {
            Err(ProviderError::validation(
                self.name,
                format!("expected {:?}, got {}", self.kind, value),
            ))
        }
    }

    fn check_validators(&self, value: &Json) -> Result<(), ProviderError> {
        for validator in &self.validators {
            match validator {
                Validator::OneOf(allowed) => {
                    if let Some(s) = value.as_str().filter(|s| !allowed.contains(s)) {
                        return Err(ProviderError::validation(
                            self.name,
                            format!("{:?} is not one of {}", s, allowed.join(", ")),
                        ));
                    }
                }
                Validator::HexColor => {
                    if let Some(s) = value.as_str() {
                        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
                            return Err(ProviderError::validation(
                                self.name,
                                format!("{:?} is not a 6 digit hex color", s),
                            ));
                        }
                    }
                }
                Validator::Date => {
                    if let Some(s) = value.as_str() {
                        chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
                            ProviderError::validation(self.name, format!("{:?} is not a YYYY-MM-DD date: {}", s, e))
                        })?;
                    }
                }
                Validator::MacAddress => {
                    if let Some(s) = value.as_str().filter(|s| !is_mac_address(s)) {
                        return Err(ProviderError::validation(
                            self.name,
                            format!("{:?} is not a MAC address", s),
                        ));
                    }
                }
                Validator::Range(min, max) => {
                    if let Some(n) = value.as_i64().filter(|n| n < min || n > max) {
                        return Err(ProviderError::validation(
                            self.name,
                            format!("{} is outside {}..={}", n, min, max),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

fn is_mac_address(s: &str) -> bool {
    let octets: Vec<&str> = s.split([':', '-']).collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
}

fn objects_with(value: &Json, keys: &[&str]) -> bool {
    value.as_array().is_some_and(|items| {
        items
            .iter()
            .all(|item| item.as_object().is_some_and(|o| keys.iter().all(|k| o.contains_key(*k))))
    })
}

/// Result of planning: the proposed state and the attributes whose change
/// forces the object to be replaced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub planned_state: Json,
    pub requires_replace: Vec<String>,
}

/// Resource schema
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(description: &'static str, attributes: Vec<Attribute>) -> Self {
        Self {
            description,
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Check a configuration object without contacting NetBox
    pub fn validate(&self, config: &Json) -> Result<(), ProviderError> {
        let object = config
            .as_object()
            .ok_or_else(|| ProviderError::validation("config", "expected an object"))?;

        if let Some(name) = object.keys().find(|k| self.attribute(k).is_none()) {
            return Err(ProviderError::validation(name.clone(), "unsupported attribute"));
        }

        for attribute in &self.attributes {
            let value = object.get(attribute.name).unwrap_or(&Json::Null);
            if value.is_null() {
                if attribute.required {
                    return Err(ProviderError::validation(attribute.name, "required attribute is missing"));
                }
                continue;
            }
            if !attribute.required && !attribute.optional {
                return Err(ProviderError::validation(
                    attribute.name,
                    "attribute is computed and cannot be set",
                ));
            }
            if is_unknown_json(value) {
                continue;
            }
            attribute.check_kind(value)?;
            attribute.check_validators(value)?;
        }
        Ok(())
    }

    /// Compute the planned state from configuration and prior state
    ///
    /// Computed attributes the user left null take their static default,
    /// else the prior value when the attribute keeps state, else unknown.
    /// Against a prior state, every `requires_replace` attribute whose
    /// planned value differs is reported.
    pub fn plan(&self, config: &Json, prior: Option<&Json>) -> Result<Plan, ProviderError> {
        self.validate(config)?;

        let mut planned = Map::new();
        for attribute in &self.attributes {
            let configured = config.get(attribute.name).cloned().unwrap_or(Json::Null);
            let value = if !configured.is_null() || !attribute.computed {
                match (&configured, &attribute.default) {
                    (Json::Null, Some(default)) => default.clone(),
                    _ => configured,
                }
            } else if let Some(default) = &attribute.default {
                default.clone()
            } else {
                let previous = prior
                    .and_then(|p| p.get(attribute.name))
                    .filter(|v| !v.is_null() && !is_unknown_json(v));
                match previous {
                    Some(previous) if attribute.use_state_for_unknown => previous.clone(),
                    _ => unknown_json(),
                }
            };
            planned.insert(attribute.name.to_string(), value);
        }

        let requires_replace = match prior {
            Some(prior) => self
                .attributes
                .iter()
                .filter(|a| a.requires_replace)
                .filter(|a| prior.get(a.name).unwrap_or(&Json::Null) != planned.get(a.name).unwrap_or(&Json::Null))
                .map(|a| a.name.to_string())
                .collect(),
            None => Vec::new(),
        };

        Ok(Plan {
            planned_state: Json::Object(planned),
            requires_replace,
        })
    }
}

/// Computed `id` attribute
pub fn id() -> Attribute {
    Attribute::computed_only("id", AttributeKind::String, "The ID of the object in NetBox.")
}

pub fn name() -> Attribute {
    Attribute::required("name", AttributeKind::String, "The name of the object.")
}

pub fn slug() -> Attribute {
    Attribute::required("slug", AttributeKind::String, "URL-friendly unique identifier.")
}

pub fn description() -> Attribute {
    Attribute::optional("description", AttributeKind::String, "Brief description of the object.")
}

pub fn comments() -> Attribute {
    Attribute::optional("comments", AttributeKind::String, "Additional comments (Markdown).")
}

pub fn tags() -> Attribute {
    Attribute::optional("tags", AttributeKind::Tags, "Tags assigned to this object.")
}

pub fn custom_fields() -> Attribute {
    Attribute::optional(
        "custom_fields",
        AttributeKind::CustomFields,
        "Custom fields assigned to this object. Only fields listed here are managed.",
    )
}

/// Optional reference by ID, name or slug
pub fn reference(name: &'static str, description: &'static str) -> Attribute {
    Attribute::optional(name, AttributeKind::String, description)
}

pub fn required_reference(name: &'static str, description: &'static str) -> Attribute {
    Attribute::required(name, AttributeKind::String, description)
}

/// Operational status, filled in by NetBox when omitted
pub fn status(allowed: &'static [&'static str]) -> Attribute {
    Attribute::optional("status", AttributeKind::String, "Operational status.")
        .one_of(allowed)
        .computed()
}

pub fn color() -> Attribute {
    Attribute::optional("color", AttributeKind::String, "Color in 6-digit hex format (e.g. aa1409).")
        .validate_with(Validator::HexColor)
        .computed()
}

/// Attributes shared by organizational models: id, name, slug, description
pub fn organizational() -> Vec<Attribute> {
    vec![id(), name(), slug(), description()]
}

/// Tags and custom fields, appended to most schemas
pub fn metadata() -> Vec<Attribute> {
    vec![tags(), custom_fields()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Schema {
        Schema::new(
            "sample",
            vec![
                id(),
                name(),
                description(),
                status(&["active", "planned"]),
                Attribute::optional("http_method", AttributeKind::String, "")
                    .default_value(json!("POST")),
                Attribute::optional("secret", AttributeKind::String, "").sensitive(),
                color(),
                Attribute::optional("vid", AttributeKind::Int64, "").validate_with(Validator::Range(1, 4094)),
            ],
        )
    }

    #[test]
    fn test_missing_required_attribute() {
        let err = sample().validate(&json!({"description": "x"})).unwrap_err();
        assert!(err.to_string().contains("name"));
        assert!(err.is_local());
    }

    #[test]
    fn test_invalid_enum_value() {
        let err = sample().validate(&json!({"name": "a", "status": "gone"})).unwrap_err();
        assert!(err.to_string().contains("not one of"));
    }

    #[test]
    fn test_computed_only_attribute_cannot_be_set() {
        assert!(sample().validate(&json!({"name": "a", "id": "4"})).is_err());
    }

    #[test]
    fn test_unknown_values_skip_checks() {
        assert!(sample().validate(&json!({"name": {"$unknown": true}, "status": {"$unknown": true}})).is_ok());
    }

    #[test]
    fn test_color_and_range_validation() {
        assert!(sample().validate(&json!({"name": "a", "color": "#fff"})).is_err());
        assert!(sample().validate(&json!({"name": "a", "color": "aa1409"})).is_ok());
        assert!(sample().validate(&json!({"name": "a", "vid": 5000})).is_err());
    }

    #[test]
    fn test_mac_address_validation() {
        let schema = Schema::new(
            "mac",
            vec![Attribute::optional("mac_address", AttributeKind::String, "").validate_with(Validator::MacAddress)],
        );
        assert!(schema.validate(&json!({"mac_address": "00:1a:2B:3c:4d:5e"})).is_ok());
        assert!(schema.validate(&json!({"mac_address": "00-1a-2b-3c-4d-5e"})).is_ok());
        assert!(schema.validate(&json!({"mac_address": "00:1a:2b:3c:4d"})).is_err());
        assert!(schema.validate(&json!({"mac_address": "00:1a:2b:3c:4d:zz"})).is_err());
    }

    #[test]
    fn test_plan_on_create_marks_computed_unknown_and_applies_defaults() {
        let plan = sample().plan(&json!({"name": "a"}), None).unwrap();
        assert!(plan.requires_replace.is_empty());
        let planned = plan.planned_state;
        assert!(is_unknown_json(&planned["id"]));
        assert!(is_unknown_json(&planned["status"]));
        assert_eq!(planned["http_method"], "POST");
        assert!(planned["description"].is_null());
        assert!(planned["secret"].is_null());
    }

    #[test]
    fn test_plan_on_update_keeps_prior_computed_values() {
        let prior = json!({"id": "7", "name": "a", "status": "planned", "color": "9e9e9e"});
        let planned = sample().plan(&json!({"name": "b"}), Some(&prior)).unwrap().planned_state;
        assert_eq!(planned["id"], "7");
        assert_eq!(planned["status"], "planned");
        assert_eq!(planned["color"], "9e9e9e");
        assert_eq!(planned["name"], "b");
    }

    #[test]
    fn test_plan_prefers_config_over_prior() {
        let prior = json!({"id": "7", "name": "a", "status": "planned"});
        let planned = sample()
            .plan(&json!({"name": "a", "status": "active"}), Some(&prior))
            .unwrap()
            .planned_state;
        assert_eq!(planned["status"], "active");
    }

    #[test]
    fn test_changed_replace_attribute_is_reported() {
        let schema = Schema::new(
            "assignment",
            vec![
                id(),
                Attribute::required("object_type", AttributeKind::String, "").requires_replace(),
                Attribute::required("object_id", AttributeKind::Int64, "").requires_replace(),
                description(),
            ],
        );
        let prior = json!({"id": "3", "object_type": "dcim.site", "object_id": 1, "description": "a"});

        let unchanged = schema
            .plan(&json!({"object_type": "dcim.site", "object_id": 1, "description": "b"}), Some(&prior))
            .unwrap();
        assert!(unchanged.requires_replace.is_empty());

        let moved = schema
            .plan(&json!({"object_type": "dcim.site", "object_id": 2}), Some(&prior))
            .unwrap();
        assert_eq!(moved.requires_replace, vec!["object_id".to_string()]);

        let pending = schema
            .plan(&json!({"object_type": {"$unknown": true}, "object_id": 1}), Some(&prior))
            .unwrap();
        assert_eq!(pending.requires_replace, vec!["object_type".to_string()]);
    }
}
