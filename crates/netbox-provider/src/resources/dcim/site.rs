//! Site resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, optional_string_from_api, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, Site};
use serde::{Deserialize, Serialize};

pub const SITE_STATUSES: &[&str] = &["planned", "staging", "active", "decommissioning", "retired"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub status: Value<String>,
    pub region: Value<String>,
    pub group: Value<String>,
    pub tenant: Value<String>,
    pub facility: Value<String>,
    pub time_zone: Value<String>,
    pub physical_address: Value<String>,
    pub shipping_address: Value<String>,
    pub latitude: Value<f64>,
    pub longitude: Value<f64>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct SiteResource;

#[async_trait::async_trait]
impl ResourceDef for SiteResource {
    type Model = SiteModel;
    type Response = Site;

    const TYPE_NAME: &'static str = "site";
    const ENDPOINT: &'static str = "dcim/sites";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::name(),
            schema::slug(),
            schema::status(SITE_STATUSES),
            schema::reference("region", "Region (ID, name or slug)."),
            schema::reference("group", "Site group (ID, name or slug)."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            Attribute::optional("facility", AttributeKind::String, "Local facility ID or description."),
            Attribute::optional("time_zone", AttributeKind::String, "IANA time zone, e.g. Europe/Amsterdam."),
            Attribute::optional("physical_address", AttributeKind::String, "Physical location of the building."),
            Attribute::optional("shipping_address", AttributeKind::String, "Address for deliveries."),
            Attribute::optional("latitude", AttributeKind::Float64, "GPS latitude in decimal format."),
            Attribute::optional("longitude", AttributeKind::Float64, "GPS longitude in decimal format."),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a site in NetBox.", attributes)
    }

    fn id(&self, model: &SiteModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut SiteModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &SiteModel,
        _prior: Option<&SiteModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("facility", &plan.facility)
            .text("physical_address", &plan.physical_address)
            .text("shipping_address", &plan.shipping_address)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.optional("status", &plan.status)?
            .nullable("time_zone", &plan.time_zone)?
            .nullable("latitude", &plan.latitude)?
            .nullable("longitude", &plan.longitude)?;
        body.reference(api, &lookup::REGION, "region", &plan.region).await?;
        body.reference(api, &lookup::SITE_GROUP, "group", &plan.group).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        Ok(body)
    }

    fn apply_response(&self, site: &Site, model: &mut SiteModel) {
        model.id = Value::known(site.id.to_string());
        model.name = Value::known(site.name.clone());
        model.slug = Value::known(site.slug.clone());
        model.status = choice_from_api(site.status.as_ref());
        model.region = reference::read_back(&model.region, site.region.as_ref());
        model.group = reference::read_back(&model.group, site.group.as_ref());
        model.tenant = reference::read_back(&model.tenant, site.tenant.as_ref());
        model.facility = string_from_api(&model.facility, &site.facility);
        model.time_zone = optional_string_from_api(&model.time_zone, site.time_zone.as_deref());
        model.physical_address = string_from_api(&model.physical_address, &site.physical_address);
        model.shipping_address = string_from_api(&model.shipping_address, &site.shipping_address);
        model.latitude = site.latitude.into();
        model.longitude = site.longitude.into();
        model.description = string_from_api(&model.description, &site.description);
        model.comments = string_from_api(&model.comments, &site.comments);
    }

    fn metadata<'a>(&self, model: &'a mut SiteModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &SiteModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_omitted_status_is_filled_from_api() {
        let mock = mock();
        let exec = executor(&mock, SiteResource);

        let created = exec
            .create(SiteModel {
                name: known("Amsterdam 1"),
                slug: known("ams1"),
                status: Value::Unknown,
                latitude: Value::Known(52.37),
                ..SiteModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.status, known("active"));
        assert_eq!(created.latitude, Value::Known(52.37));
        assert_eq!(created.time_zone, Value::Null);

        let read = exec.read(created.clone()).await.unwrap().unwrap();
        assert_eq!(read.status, known("active"));
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_references_keep_configured_format() {
        let mock = mock();
        let region = mock.insert("dcim/regions", json!({"name": "Europe", "slug": "europe"}));
        mock.insert("tenancy/tenants", json!({"name": "ACME", "slug": "acme"}));
        let exec = executor(&mock, SiteResource);

        let created = exec
            .create(SiteModel {
                name: known("Amsterdam 1"),
                slug: known("ams1"),
                status: known("planned"),
                region: known(&region.to_string()),
                tenant: known("ACME"),
                ..SiteModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.region, known(&region.to_string()));
        assert_eq!(created.tenant, known("ACME"));
        assert_eq!(created.group, Value::Null);
        assert_eq!(created.status, known("planned"));
    }

    #[tokio::test]
    async fn test_clearing_time_zone_sends_null() {
        let mock = mock();
        let exec = executor(&mock, SiteResource);
        let created = exec
            .create(SiteModel {
                name: known("Amsterdam 1"),
                slug: known("ams1"),
                time_zone: known("Europe/Amsterdam"),
                ..SiteModel::default()
            })
            .await
            .unwrap();

        let mut plan = created.clone();
        plan.time_zone = Value::Null;
        let updated = exec.update(plan, created).await.unwrap();
        assert_eq!(updated.time_zone, Value::Null);
        let body = mock.requests().pop().unwrap().body.unwrap();
        assert_eq!(body["time_zone"], serde_json::Value::Null);
    }
}
