//! DCIM models

use super::{Choice, HierarchicalObject, NestedObject, OrganizationalObject};
use serde::{Deserialize, Serialize};

/// Region model matching NetBox RegionSerializer
pub type Region = HierarchicalObject;

/// Site group model matching NetBox SiteGroupSerializer
pub type SiteGroup = HierarchicalObject;

/// Manufacturer model matching NetBox ManufacturerSerializer
pub type Manufacturer = OrganizationalObject;

/// Site model matching NetBox SiteSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Site {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    pub status: Option<Choice>,
    pub region: Option<NestedObject>,
    pub group: Option<NestedObject>,
    pub tenant: Option<NestedObject>,
    #[serde(default)]
    pub facility: String,
    pub time_zone: Option<String>,
    #[serde(default)]
    pub physical_address: String,
    #[serde(default)]
    pub shipping_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Location model matching NetBox LocationSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Location {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    pub site: Option<NestedObject>,
    pub parent: Option<NestedObject>,
    pub status: Option<Choice>,
    pub tenant: Option<NestedObject>,
    #[serde(default)]
    pub facility: String,
    #[serde(default)]
    pub description: String,
}

/// Rack role model matching NetBox RackRoleSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RackRole {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
}

/// Rack model matching NetBox RackSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Rack {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub site: Option<NestedObject>,
    pub location: Option<NestedObject>,
    pub tenant: Option<NestedObject>,
    pub status: Option<Choice>,
    pub role: Option<NestedObject>,
    pub serial: Option<String>,
    pub asset_tag: Option<String>,
    pub form_factor: Option<Choice>,
    pub width: Option<Choice>,
    pub u_height: Option<i64>,
    pub starting_unit: Option<i64>,
    pub desc_units: Option<bool>,
    pub outer_width: Option<i64>,
    pub outer_depth: Option<i64>,
    pub outer_unit: Option<Choice>,
    pub mounting_depth: Option<i64>,
    pub airflow: Option<Choice>,
    pub weight: Option<f64>,
    pub max_weight: Option<i64>,
    pub weight_unit: Option<Choice>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Platform model matching NetBox PlatformSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Platform {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    pub manufacturer: Option<NestedObject>,
    #[serde(default)]
    pub description: String,
}

/// Device role model matching NetBox DeviceRoleSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DeviceRole {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: String,
    pub vm_role: Option<bool>,
    #[serde(default)]
    pub description: String,
}

/// Device type model matching NetBox DeviceTypeSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DeviceType {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub manufacturer: Option<NestedObject>,
    pub model: String,
    pub slug: String,
    #[serde(default)]
    pub part_number: String,
    pub u_height: Option<f64>,
    pub is_full_depth: Option<bool>,
    pub airflow: Option<Choice>,
    pub weight: Option<f64>,
    pub weight_unit: Option<Choice>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Device model matching NetBox DeviceSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Device {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: Option<String>,
    pub device_type: Option<NestedObject>,
    pub role: Option<NestedObject>,
    pub site: Option<NestedObject>,
    pub location: Option<NestedObject>,
    pub rack: Option<NestedObject>,
    pub position: Option<f64>,
    pub face: Option<Choice>,
    pub tenant: Option<NestedObject>,
    pub platform: Option<NestedObject>,
    #[serde(default)]
    pub serial: String,
    pub asset_tag: Option<String>,
    pub status: Option<Choice>,
    pub airflow: Option<Choice>,
    pub primary_ip4: Option<NestedObject>,
    pub primary_ip6: Option<NestedObject>,
    pub oob_ip: Option<NestedObject>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Interface model matching NetBox InterfaceSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Interface {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub device: Option<NestedObject>,
    pub name: String,
    #[serde(rename = "type")]
    pub interface_type: Option<Choice>,
    pub enabled: Option<bool>,
    #[serde(default)]
    pub label: String,
    pub mtu: Option<i64>,
    pub mgmt_only: Option<bool>,
    pub mode: Option<Choice>,
    #[serde(default)]
    pub description: String,
}

/// One end of a cable as returned in `a_terminations` / `b_terminations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CableTermination {
    pub object_type: String,
    pub object_id: i64,
}

/// Cable model matching NetBox CableSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Cable {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(rename = "type")]
    pub cable_type: Option<Choice>,
    #[serde(default)]
    pub a_terminations: Vec<CableTermination>,
    #[serde(default)]
    pub b_terminations: Vec<CableTermination>,
    pub status: Option<Choice>,
    pub tenant: Option<NestedObject>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub color: String,
    pub length: Option<f64>,
    pub length_unit: Option<Choice>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Power panel model matching NetBox PowerPanelSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PowerPanel {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub site: Option<NestedObject>,
    pub location: Option<NestedObject>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Power feed model matching NetBox PowerFeedSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PowerFeed {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub power_panel: Option<NestedObject>,
    pub rack: Option<NestedObject>,
    pub name: String,
    pub status: Option<Choice>,
    #[serde(rename = "type")]
    pub feed_type: Option<Choice>,
    pub supply: Option<Choice>,
    pub phase: Option<Choice>,
    pub voltage: Option<i64>,
    pub amperage: Option<i64>,
    pub max_utilization: Option<i64>,
    pub mark_connected: Option<bool>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}
