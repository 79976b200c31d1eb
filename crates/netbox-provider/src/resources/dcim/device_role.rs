//! Device role resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{DeviceRole, NetBoxApi};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceRoleModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub color: Value<String>,
    pub vm_role: Value<bool>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct DeviceRoleResource;

#[async_trait::async_trait]
impl ResourceDef for DeviceRoleResource {
    type Model = DeviceRoleModel;
    type Response = DeviceRole;

    const TYPE_NAME: &'static str = "device_role";
    const ENDPOINT: &'static str = "dcim/device-roles";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.push(schema::color());
        attributes.push(
            Attribute::optional("vm_role", AttributeKind::Bool, "Virtual machines may be assigned to this role.")
                .computed(),
        );
        attributes.extend(schema::metadata());
        Schema::new("Manages a device role in NetBox.", attributes)
    }

    fn id(&self, model: &DeviceRoleModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut DeviceRoleModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &DeviceRoleModel,
        _prior: Option<&DeviceRoleModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description);
        body.optional("color", &plan.color)?
            .optional("vm_role", &plan.vm_role)?;
        Ok(body)
    }

    fn apply_response(&self, role: &DeviceRole, model: &mut DeviceRoleModel) {
        model.id = Value::known(role.id.to_string());
        model.name = Value::known(role.name.clone());
        model.slug = Value::known(role.slug.clone());
        model.color = string_from_api(&model.color, &role.color);
        model.vm_role = role.vm_role.into();
        model.description = string_from_api(&model.description, &role.description);
    }

    fn metadata<'a>(&self, model: &'a mut DeviceRoleModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &DeviceRoleModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}
