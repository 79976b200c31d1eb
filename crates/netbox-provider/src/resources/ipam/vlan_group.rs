//! VLAN group resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::mapping::{model_id, optional_string_from_api, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::resources::ipam::prefix::check_scope;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, VlanGroup};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VlanGroupModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub scope_type: Value<String>,
    pub scope_id: Value<i64>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct VlanGroupResource;

#[async_trait::async_trait]
impl ResourceDef for VlanGroupResource {
    type Model = VlanGroupModel;
    type Response = VlanGroup;

    const TYPE_NAME: &'static str = "vlan_group";
    const ENDPOINT: &'static str = "ipam/vlan-groups";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.push(Attribute::optional(
            "scope_type",
            AttributeKind::String,
            "Scope object type, e.g. dcim.site or dcim.location.",
        ));
        attributes.push(Attribute::optional("scope_id", AttributeKind::Int64, "Scope object ID."));
        attributes.extend(schema::metadata());
        Schema::new("Manages a VLAN group in NetBox.", attributes)
    }

    fn id(&self, model: &VlanGroupModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut VlanGroupModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &VlanGroupModel,
        _prior: Option<&VlanGroupModel>,
    ) -> Result<RequestBody, ProviderError> {
        check_scope(&plan.scope_type, &plan.scope_id)?;

        let mut body = RequestBody::new();
        body.int32("scope_id", &plan.scope_id)?
            .nullable("scope_type", &plan.scope_type)?;
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description);
        Ok(body)
    }

    fn apply_response(&self, group: &VlanGroup, model: &mut VlanGroupModel) {
        model.id = Value::known(group.id.to_string());
        model.name = Value::known(group.name.clone());
        model.slug = Value::known(group.slug.clone());
        model.scope_type = optional_string_from_api(&model.scope_type, group.scope_type.as_deref());
        model.scope_id = group.scope_id.into();
        model.description = string_from_api(&model.description, &group.description);
    }

    fn metadata<'a>(&self, model: &'a mut VlanGroupModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &VlanGroupModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    fn plan() -> VlanGroupModel {
        VlanGroupModel {
            name: known("Campus"),
            slug: known("campus"),
            ..VlanGroupModel::default()
        }
    }

    #[tokio::test]
    async fn test_scoped_group_round_trips() {
        let mock = mock();
        let site = mock.insert("dcim/sites", json!({"name": "Head Office", "slug": "hq"}));
        let exec = executor(&mock, VlanGroupResource);

        let created = exec
            .create(VlanGroupModel {
                scope_type: known("dcim.site"),
                scope_id: Value::Known(i64::from(site)),
                ..plan()
            })
            .await
            .unwrap();
        assert_eq!(created.scope_type, known("dcim.site"));
        assert_eq!(created.scope_id, Value::Known(i64::from(site)));

        let read = exec.read(created.clone()).await.unwrap().unwrap();
        assert_eq!(read, created);

        let updated = exec.update(plan(), created).await.unwrap();
        assert_eq!(updated.scope_type, Value::Null);
        assert_eq!(updated.scope_id, Value::Null);
    }

    #[tokio::test]
    async fn test_scope_parts_must_be_set_together() {
        let mock = mock();
        let exec = executor(&mock, VlanGroupResource);
        let err = exec
            .create(VlanGroupModel {
                scope_type: known("dcim.site"),
                ..plan()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation { .. }));
        assert_eq!(mock.request_count(), 0);
    }
}
