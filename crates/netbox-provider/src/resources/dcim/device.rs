//! Device resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, optional_string_from_api, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::resources::dcim::device_type::AIRFLOWS;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{Device, NetBoxApi};
use serde::{Deserialize, Serialize};

const DEVICE_STATUSES: &[&str] = &[
    "offline",
    "active",
    "planned",
    "staged",
    "failed",
    "inventory",
    "decommissioning",
];
const FACES: &[&str] = &["front", "rear"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub device_type: Value<String>,
    pub role: Value<String>,
    pub site: Value<String>,
    pub location: Value<String>,
    pub rack: Value<String>,
    pub position: Value<f64>,
    pub face: Value<String>,
    pub tenant: Value<String>,
    pub platform: Value<String>,
    pub serial: Value<String>,
    pub asset_tag: Value<String>,
    pub status: Value<String>,
    pub airflow: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct DeviceResource;

#[async_trait::async_trait]
impl ResourceDef for DeviceResource {
    type Model = DeviceModel;
    type Response = Device;

    const TYPE_NAME: &'static str = "device";
    const ENDPOINT: &'static str = "dcim/devices";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::optional("name", AttributeKind::String, "Device name. Unnamed devices are allowed."),
            schema::required_reference("device_type", "Device type (ID, model or slug)."),
            schema::required_reference("role", "Device role (ID, name or slug)."),
            schema::required_reference("site", "Site (ID, name or slug)."),
            schema::reference("location", "Location (ID, name or slug)."),
            schema::reference("rack", "Rack (ID or name)."),
            Attribute::optional("position", AttributeKind::Float64, "Lowest rack unit occupied by the device."),
            Attribute::optional("face", AttributeKind::String, "Rack face the device is mounted on.").one_of(FACES),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            schema::reference("platform", "Platform (ID, name or slug)."),
            Attribute::optional("serial", AttributeKind::String, "Chassis serial number."),
            Attribute::optional("asset_tag", AttributeKind::String, "Unique asset tag."),
            schema::status(DEVICE_STATUSES),
            Attribute::optional("airflow", AttributeKind::String, "Direction of airflow.").one_of(AIRFLOWS),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a device in NetBox.", attributes)
    }

    fn id(&self, model: &DeviceModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut DeviceModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &DeviceModel,
        _prior: Option<&DeviceModel>,
    ) -> Result<RequestBody, ProviderError> {
        if plan.position.is_known() && plan.rack.is_null() {
            return Err(ProviderError::validation("position", "requires rack to be set"));
        }

        let mut body = RequestBody::new();
        body.text("serial", &plan.serial)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.nullable("name", &plan.name)?
            .nullable("position", &plan.position)?
            .nullable("face", &plan.face)?
            .nullable("asset_tag", &plan.asset_tag)?
            .nullable("airflow", &plan.airflow)?
            .optional("status", &plan.status)?;
        body.required_reference(api, &lookup::DEVICE_TYPE, "device_type", &plan.device_type)
            .await?;
        body.required_reference(api, &lookup::DEVICE_ROLE, "role", &plan.role).await?;
        body.required_reference(api, &lookup::SITE, "site", &plan.site).await?;
        body.reference(api, &lookup::LOCATION, "location", &plan.location).await?;
        body.reference(api, &lookup::RACK, "rack", &plan.rack).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        body.reference(api, &lookup::PLATFORM, "platform", &plan.platform).await?;
        Ok(body)
    }

    fn apply_response(&self, device: &Device, model: &mut DeviceModel) {
        model.id = Value::known(device.id.to_string());
        model.name = optional_string_from_api(&model.name, device.name.as_deref());
        model.device_type = reference::read_back(&model.device_type, device.device_type.as_ref());
        model.role = reference::read_back(&model.role, device.role.as_ref());
        model.site = reference::read_back(&model.site, device.site.as_ref());
        model.location = reference::read_back(&model.location, device.location.as_ref());
        model.rack = reference::read_back(&model.rack, device.rack.as_ref());
        model.position = device.position.into();
        model.face = choice_from_api(device.face.as_ref());
        model.tenant = reference::read_back(&model.tenant, device.tenant.as_ref());
        model.platform = reference::read_back(&model.platform, device.platform.as_ref());
        model.serial = string_from_api(&model.serial, &device.serial);
        model.asset_tag = optional_string_from_api(&model.asset_tag, device.asset_tag.as_deref());
        model.status = choice_from_api(device.status.as_ref());
        model.airflow = choice_from_api(device.airflow.as_ref());
        model.description = string_from_api(&model.description, &device.description);
        model.comments = string_from_api(&model.comments, &device.comments);
    }

    fn metadata<'a>(&self, model: &'a mut DeviceModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    fn fixtures(mock: &netbox_client::MockNetBoxClient) {
        let manufacturer = mock.insert("dcim/manufacturers", json!({"name": "Dell", "slug": "dell"}));
        mock.insert(
            "dcim/device-types",
            json!({"manufacturer": manufacturer, "model": "PowerEdge R650", "slug": "r650"}),
        );
        mock.insert("dcim/device-roles", json!({"name": "Server", "slug": "server"}));
        mock.insert("dcim/sites", json!({"name": "AMS1", "slug": "ams1"}));
    }

    #[tokio::test]
    async fn test_references_by_model_name_and_slug() {
        let mock = mock();
        fixtures(&mock);
        let exec = executor(&mock, DeviceResource);

        let created = exec
            .create(DeviceModel {
                name: known("web-01"),
                device_type: known("PowerEdge R650"),
                role: known("server"),
                site: known("AMS1"),
                status: Value::Unknown,
                ..DeviceModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.device_type, known("PowerEdge R650"));
        assert_eq!(created.role, known("server"));
        assert_eq!(created.site, known("AMS1"));
        assert_eq!(created.status, known("active"));
        assert_eq!(created.rack, Value::Null);

        let read = exec.read(created.clone()).await.unwrap().unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_position_without_rack_is_rejected() {
        let mock = mock();
        let exec = executor(&mock, DeviceResource);

        let err = exec
            .create(DeviceModel {
                device_type: known("1"),
                role: known("1"),
                site: known("1"),
                position: Value::Known(10.0),
                ..DeviceModel::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_local());
        assert_eq!(mock.request_count(), 0);
    }
}
