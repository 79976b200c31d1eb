//! Name/slug to ID resolution
//!
//! Before submitting a request every reference attribute is turned into the
//! numeric ID NetBox expects. Numeric input is fetched by ID; anything else
//! is searched by each of the target's lookup keys in turn and must match
//! exactly one object. Names and slugs compare case-insensitively; an
//! exact-case hit breaks a tie between objects differing only in case.

use crate::error::ProviderError;
use crate::reference::Reference;
use crate::value::Value;
use netbox_client::{NetBoxApi, NetBoxError};
use serde_json::Value as Json;
use tracing::debug;

/// A kind of object references can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTarget {
    /// Endpoint below `/api/`
    pub endpoint: &'static str,
    /// Human-readable kind for error messages
    pub label: &'static str,
    /// Filter keys tried in order for non-numeric values
    pub keys: &'static [&'static str],
}

const BY_SLUG_OR_NAME: &[&str] = &["slug", "name"];
const BY_NAME: &[&str] = &["name"];

pub const TENANT: LookupTarget = LookupTarget { endpoint: "tenancy/tenants", label: "tenant", keys: BY_SLUG_OR_NAME };
pub const TENANT_GROUP: LookupTarget = LookupTarget { endpoint: "tenancy/tenant-groups", label: "tenant group", keys: BY_SLUG_OR_NAME };
pub const CONTACT_GROUP: LookupTarget = LookupTarget { endpoint: "tenancy/contact-groups", label: "contact group", keys: BY_SLUG_OR_NAME };
pub const CONTACT: LookupTarget = LookupTarget { endpoint: "tenancy/contacts", label: "contact", keys: BY_NAME };
pub const CONTACT_ROLE: LookupTarget = LookupTarget { endpoint: "tenancy/contact-roles", label: "contact role", keys: BY_SLUG_OR_NAME };
pub const REGION: LookupTarget = LookupTarget { endpoint: "dcim/regions", label: "region", keys: BY_SLUG_OR_NAME };
pub const SITE_GROUP: LookupTarget = LookupTarget { endpoint: "dcim/site-groups", label: "site group", keys: BY_SLUG_OR_NAME };
pub const SITE: LookupTarget = LookupTarget { endpoint: "dcim/sites", label: "site", keys: BY_SLUG_OR_NAME };
pub const LOCATION: LookupTarget = LookupTarget { endpoint: "dcim/locations", label: "location", keys: BY_SLUG_OR_NAME };
pub const RACK: LookupTarget = LookupTarget { endpoint: "dcim/racks", label: "rack", keys: BY_NAME };
pub const RACK_ROLE: LookupTarget = LookupTarget { endpoint: "dcim/rack-roles", label: "rack role", keys: BY_SLUG_OR_NAME };
pub const MANUFACTURER: LookupTarget = LookupTarget { endpoint: "dcim/manufacturers", label: "manufacturer", keys: BY_SLUG_OR_NAME };
pub const PLATFORM: LookupTarget = LookupTarget { endpoint: "dcim/platforms", label: "platform", keys: BY_SLUG_OR_NAME };
pub const DEVICE_ROLE: LookupTarget = LookupTarget { endpoint: "dcim/device-roles", label: "device role", keys: BY_SLUG_OR_NAME };
pub const DEVICE_TYPE: LookupTarget = LookupTarget { endpoint: "dcim/device-types", label: "device type", keys: &["slug", "model"] };
pub const DEVICE: LookupTarget = LookupTarget { endpoint: "dcim/devices", label: "device", keys: BY_NAME };
pub const POWER_PANEL: LookupTarget = LookupTarget { endpoint: "dcim/power-panels", label: "power panel", keys: BY_NAME };
pub const RIR: LookupTarget = LookupTarget { endpoint: "ipam/rirs", label: "RIR", keys: BY_SLUG_OR_NAME };
pub const IPAM_ROLE: LookupTarget = LookupTarget { endpoint: "ipam/roles", label: "IPAM role", keys: BY_SLUG_OR_NAME };
pub const VRF: LookupTarget = LookupTarget { endpoint: "ipam/vrfs", label: "VRF", keys: &["name", "rd"] };
pub const VLAN: LookupTarget = LookupTarget { endpoint: "ipam/vlans", label: "VLAN", keys: BY_NAME };
pub const VLAN_GROUP: LookupTarget = LookupTarget { endpoint: "ipam/vlan-groups", label: "VLAN group", keys: BY_SLUG_OR_NAME };
pub const FHRP_GROUP: LookupTarget = LookupTarget { endpoint: "ipam/fhrp-groups", label: "FHRP group", keys: BY_NAME };
pub const IP_ADDRESS: LookupTarget = LookupTarget { endpoint: "ipam/ip-addresses", label: "IP address", keys: &["address"] };
pub const CLUSTER_TYPE: LookupTarget = LookupTarget { endpoint: "virtualization/cluster-types", label: "cluster type", keys: BY_SLUG_OR_NAME };
pub const CLUSTER_GROUP: LookupTarget = LookupTarget { endpoint: "virtualization/cluster-groups", label: "cluster group", keys: BY_SLUG_OR_NAME };
pub const CLUSTER: LookupTarget = LookupTarget { endpoint: "virtualization/clusters", label: "cluster", keys: BY_NAME };
pub const VIRTUAL_MACHINE: LookupTarget = LookupTarget { endpoint: "virtualization/virtual-machines", label: "virtual machine", keys: BY_NAME };
pub const CIRCUIT_PROVIDER: LookupTarget = LookupTarget { endpoint: "circuits/providers", label: "circuit provider", keys: BY_SLUG_OR_NAME };
pub const CIRCUIT_TYPE: LookupTarget = LookupTarget { endpoint: "circuits/circuit-types", label: "circuit type", keys: BY_SLUG_OR_NAME };
pub const CIRCUIT: LookupTarget = LookupTarget { endpoint: "circuits/circuits", label: "circuit", keys: &["cid"] };
pub const PROVIDER_NETWORK: LookupTarget = LookupTarget { endpoint: "circuits/provider-networks", label: "provider network", keys: BY_NAME };

fn lookup_error(target: &LookupTarget, value: &str, message: impl Into<String>) -> ProviderError {
    ProviderError::Lookup {
        target: target.label.to_string(),
        value: value.to_string(),
        message: message.into(),
    }
}

/// Names and slugs match regardless of case, as in [`Reference::identifies`]
fn ignores_case(key: &str) -> bool {
    matches!(key, "name" | "slug")
}

fn object_id(object: &Json) -> Option<i32> {
    object.get("id")?.as_i64().and_then(|id| i32::try_from(id).ok())
}

/// Resolve a reference to the ID of exactly one object
pub async fn resolve(api: &dyn NetBoxApi, target: &LookupTarget, raw: &str) -> Result<i32, ProviderError> {
    let reference = Reference::new(raw);

    if let Some(id) = reference.as_id() {
        debug!("Looking up {} by ID {}", target.label, id);
        return match api.retrieve(target.endpoint, id).await {
            Ok(_) => Ok(id),
            Err(e) if e.is_not_found() => Err(lookup_error(target, raw, "no object with this ID")),
            Err(e) => Err(ProviderError::api(format!("looking up {} {}", target.label, raw), e)),
        };
    }

    for key in target.keys {
        debug!("Looking up {} by {} = {:?}", target.label, key, raw);
        let filter = if ignores_case(key) {
            format!("{}__ie", key)
        } else {
            key.to_string()
        };
        let results = api
            .list(target.endpoint, &[(filter.as_str(), raw)], true)
            .await
            .map_err(|e| ProviderError::api(format!("looking up {} {:?}", target.label, raw), e))?;

        // NetBox filters may be partial; require a full match on the key
        let hits = |exact_case: bool| -> Vec<i32> {
            results
                .iter()
                .filter(|o| {
                    o.get(*key).and_then(Json::as_str).is_some_and(|v| {
                        if exact_case || !ignores_case(key) {
                            v == raw
                        } else {
                            v.eq_ignore_ascii_case(raw)
                        }
                    })
                })
                .filter_map(object_id)
                .collect()
        };
        let mut matched = hits(false);
        if matched.len() > 1 {
            let exact = hits(true);
            if exact.len() == 1 {
                matched = exact;
            }
        }

        match matched.as_slice() {
            [] => continue,
            [id] => return Ok(*id),
            ids => {
                return Err(lookup_error(
                    target,
                    raw,
                    format!(
                        "{} objects match by {} (IDs: {}); reference it by ID instead",
                        ids.len(),
                        key,
                        ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
                    ),
                ));
            }
        }
    }

    Err(lookup_error(
        target,
        raw,
        format!("no object found by {}", target.keys.join(" or ")),
    ))
}

/// Resolve an optional reference attribute
///
/// `Null` resolves to `None`; unknown references cannot be submitted.
pub async fn resolve_optional(
    api: &dyn NetBoxApi,
    target: &LookupTarget,
    attribute: &str,
    value: &Value<String>,
) -> Result<Option<i32>, ProviderError> {
    match value {
        Value::Known(raw) => resolve(api, target, raw).await.map(Some),
        Value::Null => Ok(None),
        Value::Unknown => Err(ProviderError::validation(attribute, "value is not known yet")),
    }
}

/// Resolve a reference attribute that must be set
pub async fn resolve_required(
    api: &dyn NetBoxApi,
    target: &LookupTarget,
    attribute: &str,
    value: &Value<String>,
) -> Result<i32, ProviderError> {
    resolve_optional(api, target, attribute, value)
        .await?
        .ok_or_else(|| ProviderError::validation(attribute, "required attribute is missing"))
}

/// Find the ID of an existing object by a unique field (used for conflicts)
pub async fn find_existing(
    api: &dyn NetBoxApi,
    endpoint: &str,
    field: &str,
    value: &str,
) -> Result<Option<i32>, NetBoxError> {
    let results = api.list(endpoint, &[(field, value)], true).await?;
    Ok(results
        .iter()
        .find(|o| o.get(field).and_then(Json::as_str) == Some(value))
        .and_then(object_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use netbox_client::MockNetBoxClient;
    use serde_json::json;

    #[tokio::test]
    async fn test_numeric_reference_is_fetched_by_id() {
        let mock = MockNetBoxClient::default();
        let id = mock.insert("dcim/sites", json!({"name": "HQ", "slug": "hq"}));
        assert_eq!(resolve(&mock, &SITE, &id.to_string()).await.unwrap(), id);
        assert!(matches!(
            resolve(&mock, &SITE, "999").await,
            Err(ProviderError::Lookup { .. })
        ));
    }

    #[tokio::test]
    async fn test_slug_then_name() {
        let mock = MockNetBoxClient::default();
        let id = mock.insert("dcim/sites", json!({"name": "Head Office", "slug": "hq"}));
        assert_eq!(resolve(&mock, &SITE, "hq").await.unwrap(), id);
        assert_eq!(resolve(&mock, &SITE, "Head Office").await.unwrap(), id);
    }

    #[tokio::test]
    async fn test_name_and_slug_ignore_case() {
        let mock = MockNetBoxClient::default();
        let id = mock.insert("dcim/sites", json!({"name": "Head Office", "slug": "hq"}));
        assert_eq!(resolve(&mock, &SITE, "HQ").await.unwrap(), id);
        assert_eq!(resolve(&mock, &SITE, "head office").await.unwrap(), id);
    }

    #[tokio::test]
    async fn test_exact_case_breaks_a_tie() {
        let mock = MockNetBoxClient::default();
        let upper = mock.insert("dcim/racks", json!({"name": "R1"}));
        mock.insert("dcim/racks", json!({"name": "r1"}));
        assert_eq!(resolve(&mock, &RACK, "R1").await.unwrap(), upper);
        let err = resolve(&mock, &RACK, "r1 ").await.unwrap_err();
        assert!(err.to_string().contains("no object found"));
    }

    #[tokio::test]
    async fn test_ambiguous_name_is_an_error() {
        let mock = MockNetBoxClient::default();
        mock.insert("dcim/racks", json!({"name": "R1", "site": 1}));
        mock.insert("dcim/racks", json!({"name": "R1", "site": 2}));
        let err = resolve(&mock, &RACK, "R1").await.unwrap_err();
        assert!(err.to_string().contains("2 objects match"));
    }

    #[tokio::test]
    async fn test_missing_is_an_error() {
        let mock = MockNetBoxClient::default();
        let err = resolve(&mock, &TENANT, "nobody").await.unwrap_err();
        assert!(err.to_string().contains("no object found by slug or name"));
    }

    #[tokio::test]
    async fn test_optional_null_makes_no_call() {
        let mock = MockNetBoxClient::default();
        assert_eq!(resolve_optional(&mock, &TENANT, "tenant", &Value::Null).await.unwrap(), None);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_ip_address_by_address() {
        let mock = MockNetBoxClient::default();
        let id = mock.insert("ipam/ip-addresses", json!({"address": "10.0.0.1/24"}));
        assert_eq!(resolve(&mock, &IP_ADDRESS, "10.0.0.1/24").await.unwrap(), id);
    }
}
