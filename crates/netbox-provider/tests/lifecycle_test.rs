//! Lifecycle checks run against every registered resource

use netbox_client::MockNetBoxClient;
use netbox_provider::value::is_unknown_json;
use netbox_provider::NetBoxProvider;
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn test_every_resource_drops_missing_objects_and_tolerates_double_delete() {
    let mock = MockNetBoxClient::default();
    let provider = NetBoxProvider::new(Arc::new(mock.clone()));

    for type_name in provider.resource_types() {
        let resource = provider.resource(&type_name).unwrap();

        let state = resource.import_state("999").unwrap();
        assert!(
            resource.read(state.clone()).await.unwrap().is_none(),
            "{} read of a missing object should drop it from state",
            type_name
        );
        resource
            .delete(state)
            .await
            .unwrap_or_else(|e| panic!("{} delete of a missing object failed: {}", type_name, e));
    }
}

#[tokio::test]
async fn test_every_resource_rejects_malformed_import_ids() {
    let provider = NetBoxProvider::new(Arc::new(MockNetBoxClient::default()));
    for type_name in provider.resource_types() {
        let resource = provider.resource(&type_name).unwrap();
        for bad in ["", "abc", "-1", "0", "99999999999"] {
            assert!(
                resource.import_state(bad).is_err(),
                "{} accepted import ID {:?}",
                type_name,
                bad
            );
        }
    }
}

#[tokio::test]
async fn test_every_schema_has_a_computed_id() {
    let provider = NetBoxProvider::new(Arc::new(MockNetBoxClient::default()));
    for type_name in provider.resource_types() {
        let schema = provider.resource(&type_name).unwrap().schema();
        let id = schema
            .attribute("id")
            .unwrap_or_else(|| panic!("{} has no id attribute", type_name));
        assert!(id.computed && !id.required && !id.optional, "{} id must be computed", type_name);
        assert!(!schema.description.is_empty());
    }
}

#[tokio::test]
async fn test_plan_then_create_then_read_is_stable() {
    let mock = MockNetBoxClient::default();
    let provider = NetBoxProvider::new(Arc::new(mock.clone()));
    let resource = provider.resource("netbox_cluster_group").unwrap();

    let config = json!({"name": "Edge", "slug": "edge"});
    let planned = resource.plan(&config, None).unwrap().planned_state;
    let created = resource.create(planned).await.unwrap();
    assert_eq!(created["description"], Value::Null);

    let read = resource.read(created.clone()).await.unwrap().unwrap();
    assert_eq!(read, created);

    let replanned = resource.plan(&config, Some(&read)).unwrap();
    assert_eq!(replanned.planned_state["id"], read["id"]);
    assert!(replanned.requires_replace.is_empty());
}

/// IDs of the objects the minimal configurations below refer to
struct Fixtures {
    site: i32,
    interface_a: i32,
    interface_b: i32,
    fhrp_group: i32,
}

fn seed(mock: &MockNetBoxClient) -> Fixtures {
    let site = mock.insert("dcim/sites", json!({"name": "Head Office", "slug": "hq"}));
    let manufacturer = mock.insert("dcim/manufacturers", json!({"name": "Acme", "slug": "acme"}));
    let role = mock.insert("dcim/device-roles", json!({"name": "Leaf", "slug": "leaf"}));
    let device_type = mock.insert(
        "dcim/device-types",
        json!({"model": "QFX5120", "slug": "qfx5120", "manufacturer": manufacturer}),
    );
    let device = mock.insert(
        "dcim/devices",
        json!({"name": "leaf-01", "site": site, "role": role, "device_type": device_type}),
    );
    let interface_a = mock.insert("dcim/interfaces", json!({"name": "xe-0/0/1", "device": device, "type": "10gbase-x-sfpp"}));
    let interface_b = mock.insert("dcim/interfaces", json!({"name": "xe-0/0/2", "device": device, "type": "10gbase-x-sfpp"}));
    mock.insert("dcim/power-panels", json!({"name": "PP-1", "site": site}));
    mock.insert("ipam/rirs", json!({"name": "RFC 1918", "slug": "rfc1918", "is_private": true}));
    mock.insert("ipam/ip-addresses", json!({"address": "10.0.0.5/24"}));
    let fhrp_group = mock.insert("ipam/fhrp-groups", json!({"protocol": "vrrp2", "group_id": 10}));
    mock.insert("tenancy/contacts", json!({"name": "Jo Bloggs"}));
    mock.insert("virtualization/cluster-types", json!({"name": "VMware", "slug": "vmware"}));
    mock.insert("virtualization/virtual-machines", json!({"name": "db-01", "site": site}));
    let provider = mock.insert("circuits/providers", json!({"name": "Carrier", "slug": "carrier"}));
    let circuit_type = mock.insert("circuits/circuit-types", json!({"name": "Transit", "slug": "transit"}));
    mock.insert("circuits/circuits", json!({"cid": "CID-1", "provider": provider, "type": circuit_type}));
    Fixtures {
        site,
        interface_a,
        interface_b,
        fhrp_group,
    }
}

/// Smallest valid configuration of every resource type
fn minimal_configs(f: &Fixtures) -> Vec<(&'static str, Value)> {
    let organizational = |name: &str, slug: &str| json!({"name": name, "slug": slug});
    vec![
        ("netbox_tenant_group", organizational("Table Tenants", "table-tenants")),
        ("netbox_tenant", organizational("Table Tenant", "table-tenant")),
        ("netbox_contact_group", organizational("Table Contacts", "table-contacts")),
        ("netbox_contact_role", organizational("Table Role", "table-contact-role")),
        ("netbox_contact", json!({"name": "Table Contact"})),
        (
            "netbox_contact_assignment",
            json!({"object_type": "dcim.site", "object_id": f.site, "contact": "Jo Bloggs"}),
        ),
        ("netbox_region", organizational("Table Region", "table-region")),
        ("netbox_site_group", organizational("Table Sites", "table-sites")),
        ("netbox_site", organizational("Table Site", "table-site")),
        ("netbox_location", json!({"name": "Table Room", "slug": "table-room", "site": "hq"})),
        ("netbox_rack_role", organizational("Table Rack Role", "table-rack-role")),
        ("netbox_rack", json!({"name": "Table Rack", "site": "hq"})),
        ("netbox_manufacturer", organizational("Table Vendor", "table-vendor")),
        ("netbox_platform", organizational("Table OS", "table-os")),
        ("netbox_device_role", organizational("Table Device Role", "table-device-role")),
        (
            "netbox_device_type",
            json!({"manufacturer": "acme", "model": "Table Model", "slug": "table-model"}),
        ),
        (
            "netbox_device",
            json!({"name": "table-device", "device_type": "qfx5120", "role": "leaf", "site": "hq"}),
        ),
        ("netbox_device_primary_ip", json!({"device": "leaf-01", "primary_ip4": "10.0.0.5/24"})),
        ("netbox_interface", json!({"device": "leaf-01", "name": "table-if", "type": "virtual"})),
        (
            "netbox_cable",
            json!({
                "a_terminations": [{"object_type": "dcim.interface", "object_id": f.interface_a}],
                "b_terminations": [{"object_type": "dcim.interface", "object_id": f.interface_b}],
            }),
        ),
        ("netbox_power_panel", json!({"name": "Table Panel", "site": "hq"})),
        ("netbox_power_feed", json!({"name": "Table Feed", "power_panel": "PP-1"})),
        ("netbox_rir", organizational("Table RIR", "table-rir")),
        ("netbox_aggregate", json!({"prefix": "192.0.2.0/24", "rir": "rfc1918"})),
        ("netbox_role", organizational("Table IPAM Role", "table-ipam-role")),
        ("netbox_prefix", json!({"prefix": "10.9.0.0/16"})),
        ("netbox_ip_address", json!({"address": "10.9.0.1/24"})),
        ("netbox_ip_range", json!({"start_address": "10.9.1.10/24", "end_address": "10.9.1.20/24"})),
        ("netbox_vlan_group", organizational("Table VLANs", "table-vlans")),
        ("netbox_vlan", json!({"vid": 100, "name": "table-vlan"})),
        ("netbox_vrf", json!({"name": "table-vrf"})),
        ("netbox_route_target", json!({"name": "65000:100"})),
        ("netbox_asn", json!({"asn": 65100, "rir": "rfc1918"})),
        ("netbox_fhrp_group", json!({"protocol": "vrrp2", "group_id": 20})),
        (
            "netbox_fhrp_group_assignment",
            json!({
                "group_id": f.fhrp_group.to_string(),
                "interface_type": "dcim.interface",
                "interface_id": f.interface_a,
                "priority": 100,
            }),
        ),
        ("netbox_tag", organizational("Table Tag", "table-tag")),
        ("netbox_webhook", json!({"name": "table-hook", "payload_url": "https://hooks.example.com/netbox"})),
        (
            "netbox_journal_entry",
            json!({"assigned_object_type": "dcim.site", "assigned_object_id": f.site, "comments": "Table entry"}),
        ),
        ("netbox_cluster_type", organizational("Table Hypervisor", "table-hypervisor")),
        ("netbox_cluster_group", organizational("Table Clusters", "table-clusters")),
        ("netbox_cluster", json!({"name": "table-cluster", "type": "vmware"})),
        ("netbox_virtual_machine", json!({"name": "table-vm", "site": "hq"})),
        (
            "netbox_virtual_machine_primary_ip",
            json!({"virtual_machine": "db-01", "primary_ip4": "10.0.0.5/24"}),
        ),
        ("netbox_vm_interface", json!({"virtual_machine": "db-01", "name": "eth0"})),
        ("netbox_virtual_disk", json!({"virtual_machine": "db-01", "name": "root", "size": 40})),
        ("netbox_provider", organizational("Table Carrier", "table-carrier")),
        ("netbox_circuit_type", organizational("Table Circuit Type", "table-circuit-type")),
        ("netbox_circuit", json!({"cid": "TABLE-1", "provider": "carrier", "type": "transit"})),
        ("netbox_circuit_termination", json!({"circuit": "CID-1", "term_side": "A", "site": "hq"})),
    ]
}

/// Planned state with unknown markers read as null
fn settled(planned: &Value) -> Value {
    match planned {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), if is_unknown_json(v) { Value::Null } else { v.clone() }))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[tokio::test]
async fn test_every_resource_is_stable_after_create() {
    let mock = MockNetBoxClient::default();
    let fixtures = seed(&mock);
    let provider = NetBoxProvider::new(Arc::new(mock.clone()));
    let configs = minimal_configs(&fixtures);

    let mut covered: Vec<&str> = configs.iter().map(|(name, _)| *name).collect();
    covered.sort_unstable();
    let mut registered = provider.resource_types();
    registered.sort();
    assert_eq!(covered, registered, "every resource type needs a minimal configuration");

    for (type_name, config) in &configs {
        let resource = provider.resource(type_name).unwrap();

        let plan = resource
            .plan(config, None)
            .unwrap_or_else(|e| panic!("{} plan failed: {}", type_name, e));
        let created = resource
            .create(plan.planned_state)
            .await
            .unwrap_or_else(|e| panic!("{} create failed: {}", type_name, e));
        assert!(!created["id"].is_null(), "{} has no ID after create", type_name);

        for (attribute, value) in config.as_object().into_iter().flatten() {
            assert_eq!(&created[attribute], value, "{} changed configured {}", type_name, attribute);
        }

        let read = resource
            .read(created.clone())
            .await
            .unwrap_or_else(|e| panic!("{} read failed: {}", type_name, e))
            .unwrap_or_else(|| panic!("{} vanished after create", type_name));
        assert_eq!(read, created, "{} read differs from create", type_name);

        let replanned = resource.plan(config, Some(&read)).unwrap();
        assert!(replanned.requires_replace.is_empty(), "{} wants replacement", type_name);
        assert_eq!(settled(&replanned.planned_state), read, "{} plans a change after create", type_name);
    }
}
