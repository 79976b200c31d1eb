//! Cluster resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, optional_string_from_api, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::resources::ipam::prefix::check_scope;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{Cluster, NetBoxApi};
use serde::{Deserialize, Serialize};

const CLUSTER_STATUSES: &[&str] = &["planned", "staging", "active", "decommissioning", "offline"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterModel {
    pub id: Value<String>,
    pub name: Value<String>,
    #[serde(rename = "type")]
    pub cluster_type: Value<String>,
    pub group: Value<String>,
    pub status: Value<String>,
    pub tenant: Value<String>,
    pub scope_type: Value<String>,
    pub scope_id: Value<i64>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct ClusterResource;

#[async_trait::async_trait]
impl ResourceDef for ClusterResource {
    type Model = ClusterModel;
    type Response = Cluster;

    const TYPE_NAME: &'static str = "cluster";
    const ENDPOINT: &'static str = "virtualization/clusters";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::name(),
            schema::required_reference("type", "Cluster type (ID, name or slug)."),
            schema::reference("group", "Cluster group (ID, name or slug)."),
            schema::status(CLUSTER_STATUSES),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            Attribute::optional("scope_type", AttributeKind::String, "Scope object type, e.g. dcim.site."),
            Attribute::optional("scope_id", AttributeKind::Int64, "Scope object ID."),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a virtualization cluster in NetBox.", attributes)
    }

    fn id(&self, model: &ClusterModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut ClusterModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &ClusterModel,
        _prior: Option<&ClusterModel>,
    ) -> Result<RequestBody, ProviderError> {
        check_scope(&plan.scope_type, &plan.scope_id)?;

        let mut body = RequestBody::new();
        body.int32("scope_id", &plan.scope_id)?;
        body.text("name", &plan.name)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.optional("status", &plan.status)?
            .nullable("scope_type", &plan.scope_type)?;
        body.required_reference(api, &lookup::CLUSTER_TYPE, "type", &plan.cluster_type)
            .await?;
        body.reference(api, &lookup::CLUSTER_GROUP, "group", &plan.group).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        Ok(body)
    }

    fn apply_response(&self, cluster: &Cluster, model: &mut ClusterModel) {
        model.id = Value::known(cluster.id.to_string());
        model.name = Value::known(cluster.name.clone());
        model.cluster_type = reference::read_back(&model.cluster_type, cluster.cluster_type.as_ref());
        model.group = reference::read_back(&model.group, cluster.group.as_ref());
        model.status = choice_from_api(cluster.status.as_ref());
        model.tenant = reference::read_back(&model.tenant, cluster.tenant.as_ref());
        model.scope_type = optional_string_from_api(&model.scope_type, cluster.scope_type.as_deref());
        model.scope_id = cluster.scope_id.into();
        model.description = string_from_api(&model.description, &cluster.description);
        model.comments = string_from_api(&model.comments, &cluster.comments);
    }

    fn metadata<'a>(&self, model: &'a mut ClusterModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_type_and_group_by_slug() {
        let mock = mock();
        mock.insert("virtualization/cluster-types", json!({"name": "Proxmox", "slug": "proxmox"}));
        mock.insert("virtualization/cluster-groups", json!({"name": "Lab", "slug": "lab"}));
        let exec = executor(&mock, ClusterResource);

        let created = exec
            .create(ClusterModel {
                name: known("pve-1"),
                cluster_type: known("proxmox"),
                group: known("lab"),
                status: Value::Unknown,
                ..ClusterModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.cluster_type, known("proxmox"));
        assert_eq!(created.group, known("lab"));
        assert_eq!(created.status, known("active"));

        let state = serde_json::to_value(&created).unwrap();
        assert_eq!(state["type"], "proxmox");
    }

    #[tokio::test]
    async fn test_missing_type_fails_before_create() {
        let mock = mock();
        let exec = executor(&mock, ClusterResource);
        let err = exec
            .create(ClusterModel {
                name: known("pve-1"),
                cluster_type: known("vsphere"),
                ..ClusterModel::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Lookup { .. }));
        assert_eq!(mock.count("virtualization/clusters"), 0);
    }
}
