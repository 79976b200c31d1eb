//! Device type resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{DeviceType, NetBoxApi};
use serde::{Deserialize, Serialize};

pub(crate) const AIRFLOWS: &[&str] = &[
    "front-to-rear",
    "rear-to-front",
    "left-to-right",
    "right-to-left",
    "side-to-rear",
    "passive",
    "mixed",
];
const WEIGHT_UNITS: &[&str] = &["kg", "g", "lb", "oz"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceTypeModel {
    pub id: Value<String>,
    pub manufacturer: Value<String>,
    pub model: Value<String>,
    pub slug: Value<String>,
    pub part_number: Value<String>,
    pub u_height: Value<f64>,
    pub is_full_depth: Value<bool>,
    pub airflow: Value<String>,
    pub weight: Value<f64>,
    pub weight_unit: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct DeviceTypeResource;

#[async_trait::async_trait]
impl ResourceDef for DeviceTypeResource {
    type Model = DeviceTypeModel;
    type Response = DeviceType;

    const TYPE_NAME: &'static str = "device_type";
    const ENDPOINT: &'static str = "dcim/device-types";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::required_reference("manufacturer", "Manufacturer (ID, name or slug)."),
            Attribute::required("model", AttributeKind::String, "Model name."),
            schema::slug(),
            Attribute::optional("part_number", AttributeKind::String, "Discrete part number."),
            Attribute::optional("u_height", AttributeKind::Float64, "Height in rack units.").computed(),
            Attribute::optional("is_full_depth", AttributeKind::Bool, "Occupies both the front and rear rack faces.")
                .computed(),
            Attribute::optional("airflow", AttributeKind::String, "Direction of airflow.").one_of(AIRFLOWS),
            Attribute::optional("weight", AttributeKind::Float64, "Weight of a single unit."),
            Attribute::optional("weight_unit", AttributeKind::String, "Unit of the weight.").one_of(WEIGHT_UNITS),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a device type (make and model of hardware) in NetBox.", attributes)
    }

    fn id(&self, model: &DeviceTypeModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut DeviceTypeModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &DeviceTypeModel,
        _prior: Option<&DeviceTypeModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("model", &plan.model)
            .text("slug", &plan.slug)
            .text("part_number", &plan.part_number)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.optional("u_height", &plan.u_height)?
            .optional("is_full_depth", &plan.is_full_depth)?
            .nullable("airflow", &plan.airflow)?
            .nullable("weight", &plan.weight)?
            .nullable("weight_unit", &plan.weight_unit)?;
        body.required_reference(api, &lookup::MANUFACTURER, "manufacturer", &plan.manufacturer)
            .await?;
        Ok(body)
    }

    fn apply_response(&self, device_type: &DeviceType, model: &mut DeviceTypeModel) {
        model.id = Value::known(device_type.id.to_string());
        model.manufacturer = reference::read_back(&model.manufacturer, device_type.manufacturer.as_ref());
        model.model = Value::known(device_type.model.clone());
        model.slug = Value::known(device_type.slug.clone());
        model.part_number = string_from_api(&model.part_number, &device_type.part_number);
        model.u_height = device_type.u_height.into();
        model.is_full_depth = device_type.is_full_depth.into();
        model.airflow = choice_from_api(device_type.airflow.as_ref());
        model.weight = device_type.weight.into();
        model.weight_unit = choice_from_api(device_type.weight_unit.as_ref());
        model.description = string_from_api(&model.description, &device_type.description);
        model.comments = string_from_api(&model.comments, &device_type.comments);
    }

    fn metadata<'a>(&self, model: &'a mut DeviceTypeModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &DeviceTypeModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_manufacturer_by_slug_and_defaults() {
        let mock = mock();
        mock.insert("dcim/manufacturers", json!({"name": "Juniper Networks", "slug": "juniper"}));
        let exec = executor(&mock, DeviceTypeResource);

        let created = exec
            .create(DeviceTypeModel {
                manufacturer: known("juniper"),
                model: known("QFX5120-48Y"),
                slug: known("qfx5120-48y"),
                u_height: Value::Unknown,
                is_full_depth: Value::Unknown,
                ..DeviceTypeModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.manufacturer, known("juniper"));
        assert_eq!(created.u_height, Value::Known(1.0));
        assert_eq!(created.is_full_depth, Value::Known(true));
        assert_eq!(created.part_number, Value::Null);
    }

    #[tokio::test]
    async fn test_ambiguous_manufacturer_name_is_rejected() {
        let mock = mock();
        mock.insert("dcim/manufacturers", json!({"name": "Generic", "slug": "generic-a"}));
        mock.insert("dcim/manufacturers", json!({"name": "Generic", "slug": "generic-b"}));
        let exec = executor(&mock, DeviceTypeResource);

        let err = exec
            .create(DeviceTypeModel {
                manufacturer: known("Generic"),
                model: known("Box"),
                slug: known("box"),
                ..DeviceTypeModel::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Lookup { .. }), "{err}");
        assert_eq!(mock.count("dcim/device-types"), 0);
    }
}
