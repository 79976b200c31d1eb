//! Tenancy models

use super::{Choice, HierarchicalObject, NestedObject, OrganizationalObject};
use serde::{Deserialize, Serialize};

/// Tenant group model matching NetBox TenantGroupSerializer
pub type TenantGroup = HierarchicalObject;

/// Contact group model matching NetBox ContactGroupSerializer
pub type ContactGroup = HierarchicalObject;

/// Contact role model matching NetBox ContactRoleSerializer
pub type ContactRole = OrganizationalObject;

/// Tenant model matching NetBox TenantSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Tenant {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    pub group: Option<NestedObject>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Contact model matching NetBox ContactSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Contact {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub group: Option<NestedObject>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Contact assignment model matching NetBox ContactAssignmentSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContactAssignment {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub object_type: String,
    pub object_id: i64,
    pub contact: Option<NestedObject>,
    pub role: Option<NestedObject>,
    pub priority: Option<Choice>,
}
