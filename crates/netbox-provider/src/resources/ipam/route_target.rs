//! Route target resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, RouteTarget};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTargetModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub tenant: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct RouteTargetResource;

#[async_trait::async_trait]
impl ResourceDef for RouteTargetResource {
    type Model = RouteTargetModel;
    type Response = RouteTarget;

    const TYPE_NAME: &'static str = "route_target";
    const ENDPOINT: &'static str = "ipam/route-targets";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::required("name", AttributeKind::String, "Route target value (RFC 4360), e.g. 65000:100."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a route target in NetBox.", attributes)
    }

    fn id(&self, model: &RouteTargetModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut RouteTargetModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &RouteTargetModel,
        _prior: Option<&RouteTargetModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        Ok(body)
    }

    fn apply_response(&self, target: &RouteTarget, model: &mut RouteTargetModel) {
        model.id = Value::known(target.id.to_string());
        model.name = Value::known(target.name.clone());
        model.tenant = reference::read_back(&model.tenant, target.tenant.as_ref());
        model.description = string_from_api(&model.description, &target.description);
        model.comments = string_from_api(&model.comments, &target.comments);
    }

    fn metadata<'a>(&self, model: &'a mut RouteTargetModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &RouteTargetModel) -> Option<(&'static str, String)> {
        model.name.as_str().map(|s| ("name", s.to_string()))
    }
}
