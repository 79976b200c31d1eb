//! Rack role resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::schema::{self, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, RackRole};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RackRoleModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub color: Value<String>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct RackRoleResource;

#[async_trait::async_trait]
impl ResourceDef for RackRoleResource {
    type Model = RackRoleModel;
    type Response = RackRole;

    const TYPE_NAME: &'static str = "rack_role";
    const ENDPOINT: &'static str = "dcim/rack-roles";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.push(schema::color());
        attributes.extend(schema::metadata());
        Schema::new("Manages a rack role in NetBox.", attributes)
    }

    fn id(&self, model: &RackRoleModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut RackRoleModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &RackRoleModel,
        _prior: Option<&RackRoleModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description);
        body.optional("color", &plan.color)?;
        Ok(body)
    }

    fn apply_response(&self, role: &RackRole, model: &mut RackRoleModel) {
        model.id = Value::known(role.id.to_string());
        model.name = Value::known(role.name.clone());
        model.slug = Value::known(role.slug.clone());
        model.color = string_from_api(&model.color, &role.color);
        model.description = string_from_api(&model.description, &role.description);
    }

    fn metadata<'a>(&self, model: &'a mut RackRoleModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &RackRoleModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}
