//! IPAM models

use super::{Choice, NestedObject};
use serde::{Deserialize, Serialize};

/// RIR model matching NetBox RIRSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Rir {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    pub is_private: Option<bool>,
    #[serde(default)]
    pub description: String,
}

/// Aggregate model matching NetBox AggregateSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Aggregate {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub prefix: String,
    pub rir: Option<NestedObject>,
    pub tenant: Option<NestedObject>,
    pub date_added: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Prefix/VLAN role model matching NetBox RoleSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Role {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    pub weight: Option<i64>,
    #[serde(default)]
    pub description: String,
}

/// Prefix model matching NetBox PrefixSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Prefix {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub prefix: String, // e.g., "192.168.1.0/24"
    pub vrf: Option<NestedObject>,
    pub tenant: Option<NestedObject>,
    pub vlan: Option<NestedObject>,
    pub status: Option<Choice>,
    pub role: Option<NestedObject>,
    pub is_pool: Option<bool>,
    pub mark_utilized: Option<bool>,
    pub scope_type: Option<String>,
    pub scope_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// IP Address model matching NetBox IPAddressSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IpAddress {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub address: String, // e.g., "192.168.1.1/24"
    pub vrf: Option<NestedObject>,
    pub tenant: Option<NestedObject>,
    pub status: Option<Choice>,
    pub role: Option<Choice>,
    pub assigned_object_type: Option<String>,
    pub assigned_object_id: Option<i64>,
    #[serde(default)]
    pub dns_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// VLAN group model matching NetBox VLANGroupSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VlanGroup {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    pub scope_type: Option<String>,
    pub scope_id: Option<i64>,
    #[serde(default)]
    pub description: String,
}

/// VLAN model matching NetBox VLANSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Vlan {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub vid: i64,
    pub name: String,
    pub group: Option<NestedObject>,
    pub site: Option<NestedObject>,
    pub tenant: Option<NestedObject>,
    pub status: Option<Choice>,
    pub role: Option<NestedObject>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// VRF model matching NetBox VRFSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Vrf {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub rd: Option<String>,
    pub tenant: Option<NestedObject>,
    pub enforce_unique: Option<bool>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Route target model matching NetBox RouteTargetSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RouteTarget {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub tenant: Option<NestedObject>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// ASN model matching NetBox ASNSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Asn {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub asn: i64,
    pub rir: Option<NestedObject>,
    pub tenant: Option<NestedObject>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// FHRP group model matching NetBox FHRPGroupSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FhrpGroup {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    pub protocol: Option<Choice>,
    pub group_id: i64,
    pub auth_type: Option<Choice>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// IP range model matching NetBox IPRangeSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IpRange {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub start_address: String,
    pub end_address: String,
    pub size: Option<i64>,
    pub vrf: Option<NestedObject>,
    pub tenant: Option<NestedObject>,
    pub status: Option<Choice>,
    pub role: Option<NestedObject>,
    pub mark_utilized: Option<bool>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// FHRP group assignment model matching NetBox FHRPGroupAssignmentSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FhrpGroupAssignment {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub group: Option<NestedObject>,
    pub interface_type: String,
    pub interface_id: i64,
    pub priority: i64,
}
