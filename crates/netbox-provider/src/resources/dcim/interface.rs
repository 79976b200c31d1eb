//! Device interface resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{Interface, NetBoxApi};
use serde::{Deserialize, Serialize};

const MODES: &[&str] = &["access", "tagged", "tagged-all", "q-in-q"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceModel {
    pub id: Value<String>,
    pub device: Value<String>,
    pub name: Value<String>,
    #[serde(rename = "type")]
    pub interface_type: Value<String>,
    pub enabled: Value<bool>,
    pub mgmt_only: Value<bool>,
    pub label: Value<String>,
    pub mtu: Value<i64>,
    pub mode: Value<String>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct InterfaceResource;

#[async_trait::async_trait]
impl ResourceDef for InterfaceResource {
    type Model = InterfaceModel;
    type Response = Interface;

    const TYPE_NAME: &'static str = "interface";
    const ENDPOINT: &'static str = "dcim/interfaces";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::required_reference("device", "Device (ID or name)."),
            schema::name(),
            Attribute::required("type", AttributeKind::String, "Interface type, e.g. 1000base-t or virtual."),
            Attribute::optional("enabled", AttributeKind::Bool, "Administrative state.").computed(),
            Attribute::optional("mgmt_only", AttributeKind::Bool, "Used only for out-of-band management.").computed(),
            Attribute::optional("label", AttributeKind::String, "Physical label."),
            Attribute::optional("mtu", AttributeKind::Int64, "Maximum transmission unit.")
                .validate_with(Validator::Range(1, 65536)),
            Attribute::optional("mode", AttributeKind::String, "802.1Q mode.").one_of(MODES),
            schema::description(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a device interface in NetBox.", attributes)
    }

    fn id(&self, model: &InterfaceModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut InterfaceModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &InterfaceModel,
        _prior: Option<&InterfaceModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.int32("mtu", &plan.mtu)?;
        body.text("name", &plan.name)
            .text("type", &plan.interface_type)
            .text("label", &plan.label)
            .text("description", &plan.description);
        body.optional("enabled", &plan.enabled)?
            .optional("mgmt_only", &plan.mgmt_only)?
            .nullable("mode", &plan.mode)?;
        body.required_reference(api, &lookup::DEVICE, "device", &plan.device).await?;
        Ok(body)
    }

    fn apply_response(&self, interface: &Interface, model: &mut InterfaceModel) {
        model.id = Value::known(interface.id.to_string());
        model.device = reference::read_back(&model.device, interface.device.as_ref());
        model.name = Value::known(interface.name.clone());
        model.interface_type = choice_from_api(interface.interface_type.as_ref());
        model.enabled = interface.enabled.into();
        model.mgmt_only = interface.mgmt_only.into();
        model.label = string_from_api(&model.label, &interface.label);
        model.mtu = interface.mtu.into();
        model.mode = choice_from_api(interface.mode.as_ref());
        model.description = string_from_api(&model.description, &interface.description);
    }

    fn metadata<'a>(&self, model: &'a mut InterfaceModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_with_defaults() {
        let mock = mock();
        let device = mock.insert("dcim/devices", json!({"name": "leaf-01"}));
        let exec = executor(&mock, InterfaceResource);

        let created = exec
            .create(InterfaceModel {
                device: known("leaf-01"),
                name: known("xe-0/0/1"),
                interface_type: known("10gbase-x-sfpp"),
                enabled: Value::Unknown,
                mgmt_only: Value::Unknown,
                mtu: Value::Known(9216),
                ..InterfaceModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.interface_type, known("10gbase-x-sfpp"));
        assert_eq!(created.enabled, Value::Known(true));
        assert_eq!(created.mgmt_only, Value::Known(false));
        assert_eq!(created.mtu, Value::Known(9216));
        assert_eq!(created.mode, Value::Null);

        let id = created.id.as_str().unwrap().parse().unwrap();
        assert_eq!(mock.get("dcim/interfaces", id).unwrap()["device"]["id"], json!(device));
    }

    #[test]
    fn test_state_uses_type_key() {
        let model = InterfaceModel {
            interface_type: known("virtual"),
            ..InterfaceModel::default()
        };
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["type"], "virtual");
        assert!(InterfaceResource.schema().attribute("type").is_some());
    }
}
