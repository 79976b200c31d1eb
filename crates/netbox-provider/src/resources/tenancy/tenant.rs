//! Tenant resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, Tenant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub group: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct TenantResource;

#[async_trait::async_trait]
impl ResourceDef for TenantResource {
    type Model = TenantModel;
    type Response = Tenant;

    const TYPE_NAME: &'static str = "tenant";
    const ENDPOINT: &'static str = "tenancy/tenants";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::name(),
            schema::slug(),
            schema::reference("group", "Tenant group (ID, name or slug)."),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a tenant in NetBox.", attributes)
    }

    fn id(&self, model: &TenantModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut TenantModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &TenantModel,
        _prior: Option<&TenantModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.reference(api, &lookup::TENANT_GROUP, "group", &plan.group).await?;
        Ok(body)
    }

    fn apply_response(&self, tenant: &Tenant, model: &mut TenantModel) {
        model.id = Value::known(tenant.id.to_string());
        model.name = Value::known(tenant.name.clone());
        model.slug = Value::known(tenant.slug.clone());
        model.group = reference::read_back(&model.group, tenant.group.as_ref());
        model.description = string_from_api(&model.description, &tenant.description);
        model.comments = string_from_api(&model.comments, &tenant.comments);
    }

    fn metadata<'a>(&self, model: &'a mut TenantModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &TenantModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    fn plan() -> TenantModel {
        TenantModel {
            name: known("ACME Corp"),
            slug: known("acme"),
            ..TenantModel::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_read() {
        let mock = mock();
        mock.insert("tenancy/tenant-groups", json!({"name": "Customers", "slug": "customers"}));
        let exec = executor(&mock, TenantResource);

        let created = exec
            .create(TenantModel {
                group: known("Customers"),
                comments: known("Key account"),
                ..plan()
            })
            .await
            .unwrap();
        assert_eq!(created.group, known("Customers"));
        assert_eq!(created.comments, known("Key account"));
        assert_eq!(created.description, Value::Null);

        let read = exec.read(created.clone()).await.unwrap().unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_duplicate_slug_returns_import_hint() {
        let mock = mock();
        let existing = mock.insert("tenancy/tenants", json!({"name": "ACME", "slug": "acme"}));
        let exec = executor(&mock, TenantResource);

        let err = exec.create(plan()).await.unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, ProviderError::Duplicate { existing_id: Some(id), .. } if id == existing));
        assert!(message.contains(&format!("terraform import netbox_tenant.<name> {}", existing)), "{message}");
        assert_eq!(mock.count("tenancy/tenants"), 1);
    }

    #[tokio::test]
    async fn test_renamed_group_reads_back_new_name() {
        let mock = mock();
        let group = mock.insert("tenancy/tenant-groups", json!({"name": "Customers", "slug": "customers"}));
        let exec = executor(&mock, TenantResource);
        let created = exec
            .create(TenantModel {
                group: known("customers"),
                ..plan()
            })
            .await
            .unwrap();

        mock.remove("tenancy/tenant-groups", group);
        let other = mock.insert("tenancy/tenant-groups", json!({"name": "Partners", "slug": "partners"}));
        let id = created.id.as_str().unwrap().parse().unwrap();
        mock.partial_update("tenancy/tenants", id, &json!({"group": other}))
            .await
            .unwrap();

        let read = exec.read(created).await.unwrap().unwrap();
        assert_eq!(read.group, known("Partners"));
    }

    #[tokio::test]
    async fn test_read_after_external_delete_drops_state() {
        let mock = mock();
        let exec = executor(&mock, TenantResource);
        let created = exec.create(plan()).await.unwrap();

        let id = created.id.as_str().unwrap().parse().unwrap();
        mock.remove("tenancy/tenants", id);
        assert!(exec.read(created.clone()).await.unwrap().is_none());
        exec.delete(created).await.unwrap();
    }
}
