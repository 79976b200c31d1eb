//! Circuit termination resource
//!
//! A termination ends the A or Z side of a circuit at either a site or a
//! provider network, never both.

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{CircuitTermination, NetBoxApi};
use serde::{Deserialize, Serialize};
use serde_json::json;

const SIDES: &[&str] = &["A", "Z"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitTerminationModel {
    pub id: Value<String>,
    pub circuit: Value<String>,
    pub term_side: Value<String>,
    pub site: Value<String>,
    pub provider_network: Value<String>,
    pub port_speed: Value<i64>,
    pub upstream_speed: Value<i64>,
    pub xconnect_id: Value<String>,
    pub pp_info: Value<String>,
    pub mark_connected: Value<bool>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct CircuitTerminationResource;

#[async_trait::async_trait]
impl ResourceDef for CircuitTerminationResource {
    type Model = CircuitTerminationModel;
    type Response = CircuitTermination;

    const TYPE_NAME: &'static str = "circuit_termination";
    const ENDPOINT: &'static str = "circuits/circuit-terminations";

    fn schema(&self) -> Schema {
        let speed = |name, description| {
            Attribute::optional(name, AttributeKind::Int64, description)
                .validate_with(Validator::Range(0, i64::from(i32::MAX)))
        };
        let mut attributes = vec![
            schema::id(),
            schema::required_reference("circuit", "Circuit (ID or circuit ID)."),
            Attribute::required("term_side", AttributeKind::String, "Termination side, A or Z.").one_of(SIDES),
            schema::reference("site", "Site (ID, name or slug)."),
            schema::reference("provider_network", "Provider network (ID or name)."),
            speed("port_speed", "Physical circuit speed in Kbps."),
            speed("upstream_speed", "Upstream speed in Kbps, if different from the port speed."),
            Attribute::optional("xconnect_id", AttributeKind::String, "ID of the local cross-connect."),
            Attribute::optional("pp_info", AttributeKind::String, "Patch panel ID and port number(s)."),
            Attribute::optional("mark_connected", AttributeKind::Bool, "Treat as if a cable is connected.")
                .default_value(json!(false)),
            schema::description(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages one end of a circuit in NetBox.", attributes)
    }

    fn id(&self, model: &CircuitTerminationModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut CircuitTerminationModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &CircuitTerminationModel,
        _prior: Option<&CircuitTerminationModel>,
    ) -> Result<RequestBody, ProviderError> {
        if plan.site.is_known() && plan.provider_network.is_known() {
            return Err(ProviderError::validation(
                "provider_network",
                "a termination attaches to a site or a provider network, not both",
            ));
        }
        if plan.site.is_null() && plan.provider_network.is_null() {
            return Err(ProviderError::validation("site", "either site or provider_network must be set"));
        }

        let mut body = RequestBody::new();
        body.int32("port_speed", &plan.port_speed)?
            .int32("upstream_speed", &plan.upstream_speed)?;
        body.text("term_side", &plan.term_side)
            .text("xconnect_id", &plan.xconnect_id)
            .text("pp_info", &plan.pp_info)
            .text("description", &plan.description);
        body.optional("mark_connected", &plan.mark_connected)?;
        body.required_reference(api, &lookup::CIRCUIT, "circuit", &plan.circuit).await?;
        body.reference(api, &lookup::SITE, "site", &plan.site).await?;
        body.reference(api, &lookup::PROVIDER_NETWORK, "provider_network", &plan.provider_network)
            .await?;
        Ok(body)
    }

    fn apply_response(&self, termination: &CircuitTermination, model: &mut CircuitTerminationModel) {
        model.id = Value::known(termination.id.to_string());
        model.circuit = reference::read_back(&model.circuit, termination.circuit.as_ref());
        model.term_side = choice_from_api(termination.term_side.as_ref());
        model.site = reference::read_back(&model.site, termination.site.as_ref());
        model.provider_network = reference::read_back(&model.provider_network, termination.provider_network.as_ref());
        model.port_speed = termination.port_speed.into();
        model.upstream_speed = termination.upstream_speed.into();
        model.xconnect_id = string_from_api(&model.xconnect_id, &termination.xconnect_id);
        model.pp_info = string_from_api(&model.pp_info, &termination.pp_info);
        model.mark_connected = termination.mark_connected.into();
        model.description = string_from_api(&model.description, &termination.description);
    }

    fn metadata<'a>(&self, model: &'a mut CircuitTerminationModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}
