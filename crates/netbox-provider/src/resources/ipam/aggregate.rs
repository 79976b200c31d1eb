//! Aggregate resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, optional_string_from_api, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{Aggregate, NetBoxApi};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateModel {
    pub id: Value<String>,
    pub prefix: Value<String>,
    pub rir: Value<String>,
    pub tenant: Value<String>,
    pub date_added: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct AggregateResource;

#[async_trait::async_trait]
impl ResourceDef for AggregateResource {
    type Model = AggregateModel;
    type Response = Aggregate;

    const TYPE_NAME: &'static str = "aggregate";
    const ENDPOINT: &'static str = "ipam/aggregates";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::required("prefix", AttributeKind::String, "IPv4 or IPv6 network in CIDR notation."),
            schema::required_reference("rir", "RIR (ID, name or slug)."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            Attribute::optional("date_added", AttributeKind::String, "Date added, YYYY-MM-DD.")
                .validate_with(Validator::Date),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages an aggregate (top-level IP allocation) in NetBox.", attributes)
    }

    fn id(&self, model: &AggregateModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut AggregateModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &AggregateModel,
        _prior: Option<&AggregateModel>,
    ) -> Result<RequestBody, ProviderError> {
        if let Some(date) = plan.date_added.as_str() {
            chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                ProviderError::validation("date_added", format!("{:?} is not a YYYY-MM-DD date: {}", date, e))
            })?;
        }

        let mut body = RequestBody::new();
        body.text("prefix", &plan.prefix)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.nullable("date_added", &plan.date_added)?;
        body.required_reference(api, &lookup::RIR, "rir", &plan.rir).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        Ok(body)
    }

    fn apply_response(&self, aggregate: &Aggregate, model: &mut AggregateModel) {
        model.id = Value::known(aggregate.id.to_string());
        model.prefix = Value::known(aggregate.prefix.clone());
        model.rir = reference::read_back(&model.rir, aggregate.rir.as_ref());
        model.tenant = reference::read_back(&model.tenant, aggregate.tenant.as_ref());
        model.date_added = optional_string_from_api(&model.date_added, aggregate.date_added.as_deref());
        model.description = string_from_api(&model.description, &aggregate.description);
        model.comments = string_from_api(&model.comments, &aggregate.comments);
    }

    fn metadata<'a>(&self, model: &'a mut AggregateModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}
