//! Endpoint behaviour tables for the mock
//!
//! Describes, per endpoint, which fields NetBox expands into nested objects,
//! which are choice fields, which defaults the server fills in and which
//! fields are write-only. `"*"` applies to every endpoint unless a more
//! specific row exists.

use serde_json::{json, Map, Value};
use std::net::Ipv4Addr;

const ANY: &str = "*";

/// (endpoint, field, target endpoint) for foreign keys
const REFERENCES: &[(&str, &str, &str)] = &[
    ("dcim/regions", "parent", "dcim/regions"),
    ("dcim/site-groups", "parent", "dcim/site-groups"),
    ("dcim/locations", "parent", "dcim/locations"),
    ("tenancy/tenant-groups", "parent", "tenancy/tenant-groups"),
    ("tenancy/contact-groups", "parent", "tenancy/contact-groups"),
    ("dcim/sites", "group", "dcim/site-groups"),
    ("tenancy/tenants", "group", "tenancy/tenant-groups"),
    ("tenancy/contacts", "group", "tenancy/contact-groups"),
    ("ipam/vlans", "group", "ipam/vlan-groups"),
    ("virtualization/clusters", "group", "virtualization/cluster-groups"),
    ("virtualization/clusters", "type", "virtualization/cluster-types"),
    ("circuits/circuits", "type", "circuits/circuit-types"),
    ("dcim/racks", "role", "dcim/rack-roles"),
    ("dcim/devices", "role", "dcim/device-roles"),
    ("virtualization/virtual-machines", "role", "dcim/device-roles"),
    ("ipam/prefixes", "role", "ipam/roles"),
    ("ipam/vlans", "role", "ipam/roles"),
    ("ipam/ip-ranges", "role", "ipam/roles"),
    ("ipam/fhrp-group-assignments", "group", "ipam/fhrp-groups"),
    ("virtualization/interfaces", "untagged_vlan", "ipam/vlans"),
    ("virtualization/interfaces", "tagged_vlans", "ipam/vlans"),
    ("tenancy/contact-assignments", "contact", "tenancy/contacts"),
    ("tenancy/contact-assignments", "role", "tenancy/contact-roles"),
    (ANY, "tenant", "tenancy/tenants"),
    (ANY, "site", "dcim/sites"),
    (ANY, "location", "dcim/locations"),
    (ANY, "rack", "dcim/racks"),
    (ANY, "region", "dcim/regions"),
    (ANY, "manufacturer", "dcim/manufacturers"),
    (ANY, "platform", "dcim/platforms"),
    (ANY, "device", "dcim/devices"),
    (ANY, "device_type", "dcim/device-types"),
    (ANY, "power_panel", "dcim/power-panels"),
    (ANY, "rir", "ipam/rirs"),
    (ANY, "vrf", "ipam/vrfs"),
    (ANY, "vlan", "ipam/vlans"),
    (ANY, "cluster", "virtualization/clusters"),
    (ANY, "virtual_machine", "virtualization/virtual-machines"),
    (ANY, "circuit", "circuits/circuits"),
    (ANY, "provider_network", "circuits/provider-networks"),
    (ANY, "provider", "circuits/providers"),
    (ANY, "primary_ip4", "ipam/ip-addresses"),
    (ANY, "primary_ip6", "ipam/ip-addresses"),
    (ANY, "oob_ip", "ipam/ip-addresses"),
];

/// (endpoint, field) pairs serialized as `{"value": ..., "label": ...}`
const CHOICES: &[(&str, &str)] = &[
    (ANY, "status"),
    ("dcim/racks", "form_factor"),
    ("dcim/racks", "width"),
    ("dcim/racks", "outer_unit"),
    ("dcim/racks", "airflow"),
    ("dcim/racks", "weight_unit"),
    ("dcim/devices", "face"),
    ("dcim/devices", "airflow"),
    ("dcim/device-types", "airflow"),
    ("dcim/device-types", "weight_unit"),
    ("dcim/interfaces", "type"),
    ("dcim/interfaces", "mode"),
    ("dcim/cables", "length_unit"),
    ("dcim/power-feeds", "type"),
    ("dcim/power-feeds", "supply"),
    ("dcim/power-feeds", "phase"),
    ("ipam/ip-addresses", "role"),
    ("ipam/fhrp-groups", "protocol"),
    ("ipam/fhrp-groups", "auth_type"),
    ("virtualization/interfaces", "mode"),
    ("circuits/circuit-terminations", "term_side"),
    ("tenancy/contact-assignments", "priority"),
    ("extras/journal-entries", "kind"),
];

/// Fields accepted on write but never returned
const WRITE_ONLY: &[(&str, &str)] = &[
    ("extras/webhooks", "secret"),
    ("ipam/fhrp-groups", "auth_key"),
];

/// Endpoints whose objects get `status = active` when none is given
const ACTIVE_STATUS: &[&str] = &[
    "dcim/sites",
    "dcim/locations",
    "dcim/racks",
    "dcim/devices",
    "dcim/power-feeds",
    "ipam/prefixes",
    "ipam/ip-addresses",
    "ipam/ip-ranges",
    "ipam/vlans",
    "virtualization/clusters",
    "virtualization/virtual-machines",
    "circuits/circuits",
];

/// Target endpoint of a reference field, if `field` is one
pub(crate) fn reference_target(endpoint: &str, field: &str) -> Option<&'static str> {
    REFERENCES
        .iter()
        .find(|(e, f, _)| *e == endpoint && *f == field)
        .or_else(|| REFERENCES.iter().find(|(e, f, _)| *e == ANY && *f == field))
        .map(|(_, _, target)| *target)
}

pub(crate) fn is_choice(endpoint: &str, field: &str) -> bool {
    CHOICES
        .iter()
        .any(|(e, f)| (*e == endpoint || *e == ANY) && *f == field)
}

pub(crate) fn is_write_only(endpoint: &str, field: &str) -> bool {
    WRITE_ONLY.iter().any(|(e, f)| *e == endpoint && *f == field)
}

/// Server-side defaults for a freshly created object
pub(crate) fn defaults(endpoint: &str) -> Map<String, Value> {
    let mut record = Map::new();
    record.insert("description".to_string(), json!(""));
    record.insert("comments".to_string(), json!(""));
    record.insert("tags".to_string(), json!([]));
    record.insert("custom_fields".to_string(), json!({}));

    if ACTIVE_STATUS.contains(&endpoint) {
        record.insert("status".to_string(), json!("active"));
    }

    let specific = match endpoint {
        "dcim/cables" => json!({"status": "connected", "label": "", "color": "", "length": null, "length_unit": null}),
        "dcim/racks" => json!({"width": 19, "u_height": 42, "starting_unit": 1, "desc_units": false}),
        "dcim/rack-roles" => json!({"color": "9e9e9e"}),
        "dcim/device-roles" => json!({"color": "9e9e9e", "vm_role": true}),
        "dcim/device-types" => json!({"u_height": 1.0, "is_full_depth": true, "part_number": ""}),
        "dcim/interfaces" => json!({"enabled": true, "mgmt_only": false, "label": ""}),
        "dcim/power-feeds" => json!({
            "type": "primary", "supply": "ac", "phase": "single-phase",
            "voltage": 120, "amperage": 20, "max_utilization": 80, "mark_connected": false
        }),
        "ipam/rirs" => json!({"is_private": false}),
        "ipam/roles" => json!({"weight": 1000}),
        "ipam/prefixes" => json!({"is_pool": false, "mark_utilized": false}),
        "ipam/vrfs" => json!({"enforce_unique": true}),
        "ipam/ip-ranges" => json!({"mark_utilized": false, "size": 0}),
        "ipam/fhrp-groups" => json!({"name": ""}),
        "virtualization/interfaces" => json!({
            "enabled": true, "mtu": null, "mac_address": null, "mode": null,
            "untagged_vlan": null, "tagged_vlans": [], "vrf": null
        }),
        "virtualization/virtual-disks" => json!({"size": 0}),
        "circuits/circuit-terminations" => json!({
            "mark_connected": false, "port_speed": null, "upstream_speed": null,
            "xconnect_id": "", "pp_info": "", "site": null, "provider_network": null
        }),
        "tenancy/contact-assignments" => json!({"role": null, "priority": null}),
        "extras/webhooks" => json!({
            "http_method": "POST", "http_content_type": "application/json",
            "additional_headers": "", "body_template": "", "ssl_verification": true,
            "ca_file_path": null
        }),
        "extras/journal-entries" => json!({"kind": "info"}),
        "extras/tags" => json!({"color": "9e9e9e", "object_types": []}),
        _ => json!({}),
    };
    if let Value::Object(specific) = specific {
        record.extend(specific);
    }
    record
}

/// Fields NetBox computes from others after every write
pub(crate) fn derive(endpoint: &str, record: &mut Map<String, Value>) {
    if endpoint == "ipam/ip-ranges" {
        let host = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .and_then(|a| a.split('/').next())
                .and_then(|a| a.parse::<Ipv4Addr>().ok())
                .map(u32::from)
        };
        if let (Some(start), Some(end)) = (host("start_address"), host("end_address")) {
            let size = i64::from(end) - i64::from(start) + 1;
            record.insert("size".to_string(), json!(size.max(0)));
        }
    }
}

/// Human label NetBox attaches to a choice value (`single-phase` → `Single Phase`)
pub(crate) fn choice_label(value: &str) -> String {
    value
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `display` string derived the way NetBox's `__str__` does for each model
pub(crate) fn display(record: &Map<String, Value>, id: i32) -> String {
    ["name", "model", "address", "prefix", "cid", "rd"]
        .iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map_or_else(|| format!("#{}", id), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_reference_wins_over_wildcard() {
        assert_eq!(reference_target("dcim/devices", "role"), Some("dcim/device-roles"));
        assert_eq!(reference_target("ipam/prefixes", "role"), Some("ipam/roles"));
        assert_eq!(reference_target("ipam/ip-addresses", "role"), None);
        assert_eq!(reference_target("dcim/racks", "tenant"), Some("tenancy/tenants"));
    }

    #[test]
    fn test_choice_label() {
        assert_eq!(choice_label("single-phase"), "Single Phase");
        assert_eq!(choice_label("active"), "Active");
    }

    #[test]
    fn test_defaults_include_common_fields() {
        let d = defaults("dcim/cables");
        assert_eq!(d["status"], "connected");
        assert_eq!(d["description"], "");
        assert_eq!(d["tags"], json!([]));
    }

    #[test]
    fn test_ip_range_size_is_derived() {
        let mut record = defaults("ipam/ip-ranges");
        record.insert("start_address".to_string(), json!("10.0.0.10/24"));
        record.insert("end_address".to_string(), json!("10.0.0.20/24"));
        derive("ipam/ip-ranges", &mut record);
        assert_eq!(record["size"], 11);
    }

    #[test]
    fn test_tag_defaults() {
        let d = defaults("extras/tags");
        assert_eq!(d["color"], "9e9e9e");
        assert_eq!(d["object_types"], json!([]));
    }
}
