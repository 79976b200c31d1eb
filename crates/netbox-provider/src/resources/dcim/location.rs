//! Location resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::resources::dcim::site::SITE_STATUSES;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{Location, NetBoxApi};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub site: Value<String>,
    pub parent: Value<String>,
    pub status: Value<String>,
    pub tenant: Value<String>,
    pub facility: Value<String>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct LocationResource;

#[async_trait::async_trait]
impl ResourceDef for LocationResource {
    type Model = LocationModel;
    type Response = Location;

    const TYPE_NAME: &'static str = "location";
    const ENDPOINT: &'static str = "dcim/locations";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::name(),
            schema::slug(),
            schema::required_reference("site", "Site (ID, name or slug)."),
            schema::reference("parent", "Parent location (ID, name or slug)."),
            schema::status(SITE_STATUSES),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            Attribute::optional("facility", AttributeKind::String, "Local facility ID or description."),
            schema::description(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a location (building, floor, room) within a site in NetBox.", attributes)
    }

    fn id(&self, model: &LocationModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut LocationModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &LocationModel,
        _prior: Option<&LocationModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("facility", &plan.facility)
            .text("description", &plan.description);
        body.optional("status", &plan.status)?;
        body.required_reference(api, &lookup::SITE, "site", &plan.site).await?;
        body.reference(api, &lookup::LOCATION, "parent", &plan.parent).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        Ok(body)
    }

    fn apply_response(&self, location: &Location, model: &mut LocationModel) {
        model.id = Value::known(location.id.to_string());
        model.name = Value::known(location.name.clone());
        model.slug = Value::known(location.slug.clone());
        model.site = reference::read_back(&model.site, location.site.as_ref());
        model.parent = reference::read_back(&model.parent, location.parent.as_ref());
        model.status = choice_from_api(location.status.as_ref());
        model.tenant = reference::read_back(&model.tenant, location.tenant.as_ref());
        model.facility = string_from_api(&model.facility, &location.facility);
        model.description = string_from_api(&model.description, &location.description);
    }

    fn metadata<'a>(&self, model: &'a mut LocationModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &LocationModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}
