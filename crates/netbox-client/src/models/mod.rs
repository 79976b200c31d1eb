//! NetBox API models
//!
//! These models match the NetBox REST API serializers.
//! See: netbox/netbox/*/api/serializers_/
//!
//! Only the fields the provider reads back are modelled. `tags` and
//! `custom_fields` are shared by almost every serializer and are read from
//! the raw payload instead of being repeated on each struct.

pub mod circuits;
pub mod dcim;
pub mod extras;
pub mod ipam;
pub mod tenancy;
pub mod virtualization;

pub use circuits::*;
pub use dcim::*;
pub use extras::*;
pub use ipam::*;
pub use tenancy::*;
pub use virtualization::*;

use serde::{Deserialize, Deserializer, Serialize};

/// Brief representation NetBox embeds for related objects
///
/// Which identifying field is present depends on the model: most carry
/// `name`/`slug`, device types carry `model`, IP addresses `address`,
/// circuits `cid` and VLANs `vid`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NestedObject {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub model: Option<String>,
    pub address: Option<String>,
    pub cid: Option<String>,
    pub vid: Option<i32>,
}

impl NestedObject {
    /// Human-readable identifier of the object (name, model, address or cid)
    pub fn label(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.model.as_deref())
            .or(self.address.as_deref())
            .or(self.cid.as_deref())
    }
}

/// Nested tag model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NestedTag {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: String,
}

/// Choice field as returned by NetBox (`{"value": ..., "label": ...}`)
///
/// Some endpoints return plain strings for choice fields (e.g. cable `type`);
/// both shapes decode into the same type. Numeric values (rack `width`) are
/// kept in their string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    /// Choice value, or `None` when NetBox reports the field as unset
    pub fn value(&self) -> Option<&str> {
        if self.value.is_empty() {
            None
        } else {
            Some(&self.value)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChoiceRepr {
    Plain(String),
    Labeled {
        value: serde_json::Value,
        #[serde(default)]
        label: serde_json::Value,
    },
}

fn json_scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for Choice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ChoiceRepr::deserialize(deserializer)? {
            ChoiceRepr::Plain(value) => Choice {
                label: value.clone(),
                value,
            },
            ChoiceRepr::Labeled { value, label } => Choice {
                value: json_scalar_to_string(&value),
                label: json_scalar_to_string(&label),
            },
        })
    }
}

/// Organizational model shared by manufacturers, contact roles, cluster
/// types and cluster groups
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OrganizationalObject {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Nested-set model (regions, site groups, tenant groups, contact groups)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HierarchicalObject {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    pub parent: Option<NestedObject>,
    #[serde(default)]
    pub description: String,
}
