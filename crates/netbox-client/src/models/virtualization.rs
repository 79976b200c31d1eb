//! Virtualization models

use super::{Choice, NestedObject, OrganizationalObject};
use serde::{Deserialize, Serialize};

/// Cluster type model matching NetBox ClusterTypeSerializer
pub type ClusterType = OrganizationalObject;

/// Cluster group model matching NetBox ClusterGroupSerializer
pub type ClusterGroup = OrganizationalObject;

/// Cluster model matching NetBox ClusterSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Cluster {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: Option<NestedObject>,
    pub group: Option<NestedObject>,
    pub status: Option<Choice>,
    pub tenant: Option<NestedObject>,
    pub scope_type: Option<String>,
    pub scope_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Virtual machine model matching NetBox VirtualMachineSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VirtualMachine {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub cluster: Option<NestedObject>,
    pub site: Option<NestedObject>,
    pub status: Option<Choice>,
    pub role: Option<NestedObject>,
    pub tenant: Option<NestedObject>,
    pub platform: Option<NestedObject>,
    pub vcpus: Option<f64>,
    pub memory: Option<i64>,
    pub disk: Option<i64>,
    pub primary_ip4: Option<NestedObject>,
    pub primary_ip6: Option<NestedObject>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// VM interface model matching NetBox VMInterfaceSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VmInterface {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub virtual_machine: Option<NestedObject>,
    pub name: String,
    pub enabled: Option<bool>,
    pub mtu: Option<i64>,
    pub mac_address: Option<String>,
    pub mode: Option<Choice>,
    pub untagged_vlan: Option<NestedObject>,
    #[serde(default)]
    pub tagged_vlans: Vec<NestedObject>,
    pub vrf: Option<NestedObject>,
    #[serde(default)]
    pub description: String,
}

/// Virtual disk model matching NetBox VirtualDiskSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VirtualDisk {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub virtual_machine: Option<NestedObject>,
    pub name: String,
    pub size: i64,
    #[serde(default)]
    pub description: String,
}
