//! Circuits models

use super::{Choice, NestedObject};
use serde::{Deserialize, Serialize};

/// Circuit provider model matching NetBox ProviderSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CircuitProvider {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Circuit type model matching NetBox CircuitTypeSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CircuitType {
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

/// Circuit model matching NetBox CircuitSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Circuit {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub cid: String,
    pub provider: Option<NestedObject>,
    #[serde(rename = "type")]
    pub circuit_type: Option<NestedObject>,
    pub status: Option<Choice>,
    pub tenant: Option<NestedObject>,
    pub install_date: Option<String>,
    pub termination_date: Option<String>,
    pub commit_rate: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
}

/// Circuit termination model matching NetBox CircuitTerminationSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CircuitTermination {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub circuit: Option<NestedObject>,
    pub term_side: Option<Choice>,
    pub site: Option<NestedObject>,
    pub provider_network: Option<NestedObject>,
    pub port_speed: Option<i64>,
    pub upstream_speed: Option<i64>,
    #[serde(default)]
    pub xconnect_id: String,
    #[serde(default)]
    pub pp_info: String,
    pub mark_connected: Option<bool>,
    #[serde(default)]
    pub description: String,
}
