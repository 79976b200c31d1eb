//! VRF resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, optional_string_from_api, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, Vrf};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VrfModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub rd: Value<String>,
    pub tenant: Value<String>,
    pub enforce_unique: Value<bool>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct VrfResource;

#[async_trait::async_trait]
impl ResourceDef for VrfResource {
    type Model = VrfModel;
    type Response = Vrf;

    const TYPE_NAME: &'static str = "vrf";
    const ENDPOINT: &'static str = "ipam/vrfs";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::name(),
            Attribute::optional("rd", AttributeKind::String, "Route distinguisher (RFC 4364)."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            Attribute::optional("enforce_unique", AttributeKind::Bool, "Prevent duplicate prefixes/addresses.")
                .computed(),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a VRF in NetBox.", attributes)
    }

    fn id(&self, model: &VrfModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut VrfModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &VrfModel,
        _prior: Option<&VrfModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.nullable("rd", &plan.rd)?
            .optional("enforce_unique", &plan.enforce_unique)?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        Ok(body)
    }

    fn apply_response(&self, vrf: &Vrf, model: &mut VrfModel) {
        model.id = Value::known(vrf.id.to_string());
        model.name = Value::known(vrf.name.clone());
        model.rd = optional_string_from_api(&model.rd, vrf.rd.as_deref());
        model.tenant = reference::read_back(&model.tenant, vrf.tenant.as_ref());
        model.enforce_unique = vrf.enforce_unique.into();
        model.description = string_from_api(&model.description, &vrf.description);
        model.comments = string_from_api(&model.comments, &vrf.comments);
    }

    fn metadata<'a>(&self, model: &'a mut VrfModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    fn plan() -> VrfModel {
        VrfModel {
            name: known("customer-a"),
            enforce_unique: Value::Unknown,
            ..VrfModel::default()
        }
    }

    #[tokio::test]
    async fn test_enforce_unique_defaults_to_true() {
        let mock = mock();
        let exec = executor(&mock, VrfResource);

        let created = exec.create(plan()).await.unwrap();
        assert_eq!(created.enforce_unique, Value::Known(true));
        assert_eq!(created.rd, Value::Null);
        assert_eq!(created.tenant, Value::Null);

        let read = exec.read(created.clone()).await.unwrap().unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_rd_and_tenant_round_trip_and_clear() {
        let mock = mock();
        mock.insert("tenancy/tenants", json!({"name": "Customer A", "slug": "customer-a"}));
        let exec = executor(&mock, VrfResource);

        let created = exec
            .create(VrfModel {
                rd: known("65000:100"),
                tenant: known("customer-a"),
                enforce_unique: Value::Known(false),
                ..plan()
            })
            .await
            .unwrap();
        assert_eq!(created.rd, known("65000:100"));
        assert_eq!(created.tenant, known("customer-a"));
        assert_eq!(created.enforce_unique, Value::Known(false));

        let mut cleared = created.clone();
        cleared.rd = Value::Null;
        cleared.tenant = Value::Null;
        let updated = exec.update(cleared, created).await.unwrap();
        assert_eq!(updated.rd, Value::Null);
        assert_eq!(updated.tenant, Value::Null);

        let id = updated.id.as_str().unwrap().parse().unwrap();
        assert!(mock.get("ipam/vrfs", id).unwrap()["rd"].is_null());
    }
}
