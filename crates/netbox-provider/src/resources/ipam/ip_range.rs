//! IP range resource
//!
//! `size` is computed by NetBox from the two bounds and is read-only.

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{IpRange, NetBoxApi};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::IpAddr;

const RANGE_STATUSES: &[&str] = &["active", "reserved", "deprecated"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpRangeModel {
    pub id: Value<String>,
    pub start_address: Value<String>,
    pub end_address: Value<String>,
    pub size: Value<i64>,
    pub vrf: Value<String>,
    pub tenant: Value<String>,
    pub status: Value<String>,
    pub role: Value<String>,
    pub mark_utilized: Value<bool>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

fn host(attribute: &str, address: &str) -> Result<IpAddr, ProviderError> {
    let host = address.split('/').next().unwrap_or(address);
    host.parse()
        .map_err(|_| ProviderError::validation(attribute, format!("{:?} is not an IP address", address)))
}

/// Both bounds in one address family, start not above end
fn check_bounds(start: &Value<String>, end: &Value<String>) -> Result<(), ProviderError> {
    let (Some(start), Some(end)) = (start.as_str(), end.as_str()) else {
        return Ok(());
    };
    let (start, end) = (host("start_address", start)?, host("end_address", end)?);
    if start.is_ipv4() != end.is_ipv4() {
        return Err(ProviderError::validation(
            "end_address",
            "start_address and end_address must be in the same address family",
        ));
    }
    if start > end {
        return Err(ProviderError::validation(
            "end_address",
            "end_address must not be lower than start_address",
        ));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct IpRangeResource;

#[async_trait::async_trait]
impl ResourceDef for IpRangeResource {
    type Model = IpRangeModel;
    type Response = IpRange;

    const TYPE_NAME: &'static str = "ip_range";
    const ENDPOINT: &'static str = "ipam/ip-ranges";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::required("start_address", AttributeKind::String, "First address of the range, with mask."),
            Attribute::required("end_address", AttributeKind::String, "Last address of the range, with mask."),
            Attribute::computed_only("size", AttributeKind::Int64, "Number of addresses in the range."),
            schema::reference("vrf", "VRF (ID or name)."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            Attribute::optional("status", AttributeKind::String, "Operational status.")
                .one_of(RANGE_STATUSES)
                .default_value(json!("active")),
            schema::reference("role", "IPAM role (ID, name or slug)."),
            Attribute::optional("mark_utilized", AttributeKind::Bool, "Treat the range as fully utilized.")
                .default_value(json!(false)),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a range of IP addresses in NetBox.", attributes)
    }

    fn id(&self, model: &IpRangeModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut IpRangeModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &IpRangeModel,
        _prior: Option<&IpRangeModel>,
    ) -> Result<RequestBody, ProviderError> {
        check_bounds(&plan.start_address, &plan.end_address)?;

        let mut body = RequestBody::new();
        body.text("start_address", &plan.start_address)
            .text("end_address", &plan.end_address)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.optional("status", &plan.status)?
            .optional("mark_utilized", &plan.mark_utilized)?;
        body.reference(api, &lookup::VRF, "vrf", &plan.vrf).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        body.reference(api, &lookup::IPAM_ROLE, "role", &plan.role).await?;
        Ok(body)
    }

    fn apply_response(&self, range: &IpRange, model: &mut IpRangeModel) {
        model.id = Value::known(range.id.to_string());
        model.start_address = Value::known(range.start_address.clone());
        model.end_address = Value::known(range.end_address.clone());
        model.size = range.size.into();
        model.vrf = reference::read_back(&model.vrf, range.vrf.as_ref());
        model.tenant = reference::read_back(&model.tenant, range.tenant.as_ref());
        model.status = choice_from_api(range.status.as_ref());
        model.role = reference::read_back(&model.role, range.role.as_ref());
        model.mark_utilized = range.mark_utilized.into();
        model.description = string_from_api(&model.description, &range.description);
        model.comments = string_from_api(&model.comments, &range.comments);
    }

    fn metadata<'a>(&self, model: &'a mut IpRangeModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}
