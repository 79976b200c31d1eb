//! Virtual machine interface resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, optional_string_from_api, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference::{self, Reference};
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{NestedObject, NetBoxApi, VmInterface};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeSet;

const MODES: &[&str] = &["access", "tagged", "tagged-all"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmInterfaceModel {
    pub id: Value<String>,
    pub virtual_machine: Value<String>,
    pub name: Value<String>,
    pub enabled: Value<bool>,
    pub mtu: Value<i64>,
    pub mac_address: Value<String>,
    pub mode: Value<String>,
    pub untagged_vlan: Value<String>,
    pub tagged_vlans: Value<BTreeSet<String>>,
    pub vrf: Value<String>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

/// Keep each configured VLAN reference that still identifies a tagged VLAN
fn tagged_vlans_from_api(current: &Value<BTreeSet<String>>, vlans: &[NestedObject]) -> Value<BTreeSet<String>> {
    if vlans.is_empty() && !current.is_known() {
        return Value::Null;
    }
    let configured = current.as_known().cloned().unwrap_or_default();
    let read = vlans
        .iter()
        .filter_map(|vlan| {
            let kept = configured
                .iter()
                .find(|raw| Reference::new(raw.as_str()).identifies(vlan))
                .cloned()
                .map(Value::Known)
                .unwrap_or_else(|| reference::read_back(&Value::Null, Some(vlan)));
            kept.into_known()
        })
        .collect();
    Value::Known(read)
}

/// NetBox may change the case of a MAC address; equal ignoring case keeps the configured form
fn mac_from_api(current: &Value<String>, api: Option<&str>) -> Value<String> {
    match (current.as_str(), api) {
        (Some(configured), Some(reported)) if configured.eq_ignore_ascii_case(reported) => current.clone(),
        _ => optional_string_from_api(current, api),
    }
}

#[derive(Debug, Default)]
pub struct VmInterfaceResource;

#[async_trait::async_trait]
impl ResourceDef for VmInterfaceResource {
    type Model = VmInterfaceModel;
    type Response = VmInterface;

    const TYPE_NAME: &'static str = "vm_interface";
    const ENDPOINT: &'static str = "virtualization/interfaces";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::required_reference("virtual_machine", "Virtual machine (ID or name)."),
            schema::name(),
            Attribute::optional("enabled", AttributeKind::Bool, "Administrative state.").computed(),
            Attribute::optional("mtu", AttributeKind::Int64, "Maximum transmission unit.")
                .validate_with(Validator::Range(1, 65536)),
            Attribute::optional("mac_address", AttributeKind::String, "MAC address.")
                .validate_with(Validator::MacAddress),
            Attribute::optional("mode", AttributeKind::String, "802.1Q mode.").one_of(MODES),
            schema::reference("untagged_vlan", "Untagged VLAN (ID or name)."),
            Attribute::optional(
                "tagged_vlans",
                AttributeKind::StringList,
                "Tagged VLANs (IDs or names). Requires mode tagged.",
            ),
            schema::reference("vrf", "VRF (ID or name)."),
            schema::description(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a virtual machine interface in NetBox.", attributes)
    }

    fn id(&self, model: &VmInterfaceModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut VmInterfaceModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &VmInterfaceModel,
        _prior: Option<&VmInterfaceModel>,
    ) -> Result<RequestBody, ProviderError> {
        let tagged = plan.tagged_vlans.as_known().filter(|vlans| !vlans.is_empty());
        if tagged.is_some() && plan.mode.as_str().is_some_and(|m| m != "tagged") {
            return Err(ProviderError::validation(
                "tagged_vlans",
                "tagged VLANs can only be assigned when mode is tagged",
            ));
        }
        if tagged.is_some() && plan.mode.is_null() {
            return Err(ProviderError::validation("mode", "mode must be tagged when tagged_vlans is set"));
        }

        let mut body = RequestBody::new();
        body.int32("mtu", &plan.mtu)?;
        body.text("name", &plan.name).text("description", &plan.description);
        body.optional("enabled", &plan.enabled)?
            .nullable("mac_address", &plan.mac_address)?
            .nullable("mode", &plan.mode)?;
        body.required_reference(api, &lookup::VIRTUAL_MACHINE, "virtual_machine", &plan.virtual_machine)
            .await?;
        body.reference(api, &lookup::VLAN, "untagged_vlan", &plan.untagged_vlan).await?;
        body.reference(api, &lookup::VRF, "vrf", &plan.vrf).await?;

        match &plan.tagged_vlans {
            Value::Known(vlans) => {
                let mut ids = Vec::with_capacity(vlans.len());
                for raw in vlans {
                    ids.push(Json::from(lookup::resolve(api, &lookup::VLAN, raw).await?));
                }
                body.set("tagged_vlans", Json::Array(ids));
            }
            Value::Null => {
                body.set("tagged_vlans", Json::Array(Vec::new()));
            }
            Value::Unknown => {}
        }
        Ok(body)
    }

    fn apply_response(&self, interface: &VmInterface, model: &mut VmInterfaceModel) {
        model.id = Value::known(interface.id.to_string());
        model.virtual_machine = reference::read_back(&model.virtual_machine, interface.virtual_machine.as_ref());
        model.name = Value::known(interface.name.clone());
        model.enabled = interface.enabled.into();
        model.mtu = interface.mtu.into();
        model.mac_address = mac_from_api(&model.mac_address, interface.mac_address.as_deref());
        model.mode = choice_from_api(interface.mode.as_ref());
        model.untagged_vlan = reference::read_back(&model.untagged_vlan, interface.untagged_vlan.as_ref());
        model.tagged_vlans = tagged_vlans_from_api(&model.tagged_vlans, &interface.tagged_vlans);
        model.vrf = reference::read_back(&model.vrf, interface.vrf.as_ref());
        model.description = string_from_api(&model.description, &interface.description);
    }

    fn metadata<'a>(&self, model: &'a mut VmInterfaceModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    fn plan() -> VmInterfaceModel {
        VmInterfaceModel {
            virtual_machine: known("db-01"),
            name: known("eth0"),
            enabled: Value::Unknown,
            ..VmInterfaceModel::default()
        }
    }

    #[tokio::test]
    async fn test_create_with_defaults() {
        let mock = mock();
        let vm = mock.insert("virtualization/virtual-machines", json!({"name": "db-01"}));
        let exec = executor(&mock, VmInterfaceResource);

        let created = exec.create(plan()).await.unwrap();
        assert_eq!(created.enabled, Value::Known(true));
        assert_eq!(created.virtual_machine, known("db-01"));
        assert_eq!(created.mode, Value::Null);
        assert_eq!(created.tagged_vlans, Value::Null);
        assert_eq!(created.mac_address, Value::Null);

        let id = created.id.as_str().unwrap().parse().unwrap();
        assert_eq!(mock.get("virtualization/interfaces", id).unwrap()["virtual_machine"]["id"], json!(vm));

        let read = exec.read(created.clone()).await.unwrap().unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_tagged_vlans_keep_configured_form() {
        let mock = mock();
        mock.insert("virtualization/virtual-machines", json!({"name": "db-01"}));
        let users = mock.insert("ipam/vlans", json!({"name": "users", "vid": 10}));
        mock.insert("ipam/vlans", json!({"name": "voice", "vid": 20}));
        let exec = executor(&mock, VmInterfaceResource);

        let created = exec
            .create(VmInterfaceModel {
                mode: known("tagged"),
                mac_address: known("00:1a:2b:3c:4d:5e"),
                tagged_vlans: Value::Known(BTreeSet::from([users.to_string(), "voice".to_string()])),
                ..plan()
            })
            .await
            .unwrap();
        let vlans = created.tagged_vlans.as_known().unwrap();
        assert!(vlans.contains(&users.to_string()));
        assert!(vlans.contains("voice"));
        assert_eq!(created.mac_address, known("00:1a:2b:3c:4d:5e"));

        let mut access = created.clone();
        access.mode = known("access");
        access.tagged_vlans = Value::Null;
        access.untagged_vlan = known("users");
        let updated = exec.update(access, created).await.unwrap();
        assert_eq!(updated.tagged_vlans, Value::Null);
        assert_eq!(updated.untagged_vlan, known("users"));
    }

    #[tokio::test]
    async fn test_tagged_vlans_need_tagged_mode() {
        let mock = mock();
        mock.insert("virtualization/virtual-machines", json!({"name": "db-01"}));
        mock.insert("ipam/vlans", json!({"name": "users", "vid": 10}));
        let exec = executor(&mock, VmInterfaceResource);

        let err = exec
            .create(VmInterfaceModel {
                mode: known("access"),
                tagged_vlans: Value::Known(BTreeSet::from(["users".to_string()])),
                ..plan()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation { .. }));
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_uppercase_mac_from_api_keeps_configured_case() {
        let configured = known("00:1a:2b:3c:4d:5e");
        assert_eq!(mac_from_api(&configured, Some("00:1A:2B:3C:4D:5E")), configured);
        assert_eq!(mac_from_api(&Value::Null, Some("00:1A:2B:3C:4D:5E")), known("00:1A:2B:3C:4D:5E"));
        assert_eq!(mac_from_api(&configured, None), Value::Null);
    }
}
