//! IPAM role resource (prefix and VLAN roles)

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub weight: Value<i64>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct RoleResource;

#[async_trait::async_trait]
impl ResourceDef for RoleResource {
    type Model = RoleModel;
    type Response = Role;

    const TYPE_NAME: &'static str = "role";
    const ENDPOINT: &'static str = "ipam/roles";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.push(Attribute::optional("weight", AttributeKind::Int64, "Sort weight.").computed());
        attributes.extend(schema::metadata());
        Schema::new("Manages a prefix/VLAN role in NetBox.", attributes)
    }

    fn id(&self, model: &RoleModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut RoleModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &RoleModel,
        _prior: Option<&RoleModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.optional_int32("weight", &plan.weight)?;
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description);
        Ok(body)
    }

    fn apply_response(&self, role: &Role, model: &mut RoleModel) {
        model.id = Value::known(role.id.to_string());
        model.name = Value::known(role.name.clone());
        model.slug = Value::known(role.slug.clone());
        model.weight = role.weight.into();
        model.description = string_from_api(&model.description, &role.description);
    }

    fn metadata<'a>(&self, model: &'a mut RoleModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &RoleModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};

    fn plan() -> RoleModel {
        RoleModel {
            name: known("Production"),
            slug: known("production"),
            weight: Value::Unknown,
            ..RoleModel::default()
        }
    }

    #[tokio::test]
    async fn test_weight_defaults_to_1000() {
        let mock = mock();
        let exec = executor(&mock, RoleResource);

        let created = exec.create(plan()).await.unwrap();
        assert_eq!(created.weight, Value::Known(1000));

        let read = exec.read(created.clone()).await.unwrap().unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_weight_out_of_range_is_rejected() {
        let mock = mock();
        let exec = executor(&mock, RoleResource);
        let err = exec
            .create(RoleModel {
                weight: Value::Known(i64::from(i32::MAX) + 1),
                ..plan()
            })
            .await
            .unwrap_err();
        assert!(err.is_local());
        assert_eq!(mock.request_count(), 0);
    }
}
