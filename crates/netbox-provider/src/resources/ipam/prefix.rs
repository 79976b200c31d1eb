//! Prefix resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, optional_string_from_api, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, Prefix};
use serde::{Deserialize, Serialize};

const PREFIX_STATUSES: &[&str] = &["container", "active", "reserved", "deprecated"];

/// Scope is a generic foreign key: both halves are set or neither
pub(crate) fn check_scope(scope_type: &Value<String>, scope_id: &Value<i64>) -> Result<(), ProviderError> {
    if scope_type.is_null() != scope_id.is_null() {
        return Err(ProviderError::validation(
            "scope_id",
            "scope_type and scope_id must be set together",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixModel {
    pub id: Value<String>,
    pub prefix: Value<String>,
    pub vrf: Value<String>,
    pub tenant: Value<String>,
    pub vlan: Value<String>,
    pub status: Value<String>,
    pub role: Value<String>,
    pub is_pool: Value<bool>,
    pub mark_utilized: Value<bool>,
    pub scope_type: Value<String>,
    pub scope_id: Value<i64>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct PrefixResource;

#[async_trait::async_trait]
impl ResourceDef for PrefixResource {
    type Model = PrefixModel;
    type Response = Prefix;

    const TYPE_NAME: &'static str = "prefix";
    const ENDPOINT: &'static str = "ipam/prefixes";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::required("prefix", AttributeKind::String, "IPv4 or IPv6 network in CIDR notation."),
            schema::reference("vrf", "VRF (ID or name)."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            schema::reference("vlan", "VLAN (ID or name)."),
            schema::status(PREFIX_STATUSES),
            schema::reference("role", "IPAM role (ID, name or slug)."),
            Attribute::optional("is_pool", AttributeKind::Bool, "All IP addresses within this prefix are usable.")
                .computed(),
            Attribute::optional("mark_utilized", AttributeKind::Bool, "Treat as fully utilized.").computed(),
            Attribute::optional("scope_type", AttributeKind::String, "Scope object type, e.g. dcim.site."),
            Attribute::optional("scope_id", AttributeKind::Int64, "Scope object ID."),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages an IP prefix in NetBox.", attributes)
    }

    fn id(&self, model: &PrefixModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut PrefixModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &PrefixModel,
        _prior: Option<&PrefixModel>,
    ) -> Result<RequestBody, ProviderError> {
        check_scope(&plan.scope_type, &plan.scope_id)?;

        let mut body = RequestBody::new();
        body.int32("scope_id", &plan.scope_id)?;
        body.text("prefix", &plan.prefix)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.optional("status", &plan.status)?
            .optional("is_pool", &plan.is_pool)?
            .optional("mark_utilized", &plan.mark_utilized)?
            .nullable("scope_type", &plan.scope_type)?;
        body.reference(api, &lookup::VRF, "vrf", &plan.vrf).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        body.reference(api, &lookup::VLAN, "vlan", &plan.vlan).await?;
        body.reference(api, &lookup::IPAM_ROLE, "role", &plan.role).await?;
        Ok(body)
    }

    fn apply_response(&self, prefix: &Prefix, model: &mut PrefixModel) {
        model.id = Value::known(prefix.id.to_string());
        model.prefix = Value::known(prefix.prefix.clone());
        model.vrf = reference::read_back(&model.vrf, prefix.vrf.as_ref());
        model.tenant = reference::read_back(&model.tenant, prefix.tenant.as_ref());
        model.vlan = reference::read_back(&model.vlan, prefix.vlan.as_ref());
        model.status = choice_from_api(prefix.status.as_ref());
        model.role = reference::read_back(&model.role, prefix.role.as_ref());
        model.is_pool = prefix.is_pool.into();
        model.mark_utilized = prefix.mark_utilized.into();
        model.scope_type = optional_string_from_api(&model.scope_type, prefix.scope_type.as_deref());
        model.scope_id = prefix.scope_id.into();
        model.description = string_from_api(&model.description, &prefix.description);
        model.comments = string_from_api(&model.comments, &prefix.comments);
    }

    fn metadata<'a>(&self, model: &'a mut PrefixModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}
