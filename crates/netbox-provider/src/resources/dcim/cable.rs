//! Cable resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{Cable, CableTermination, NetBoxApi};
use serde::{Deserialize, Serialize};
use serde_json::json;

const CABLE_STATUSES: &[&str] = &["connected", "planned", "decommissioning"];
const LENGTH_UNITS: &[&str] = &["km", "m", "cm", "mi", "ft", "in"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CableModel {
    pub id: Value<String>,
    pub a_terminations: Value<Vec<CableTermination>>,
    pub b_terminations: Value<Vec<CableTermination>>,
    #[serde(rename = "type")]
    pub cable_type: Value<String>,
    pub status: Value<String>,
    pub tenant: Value<String>,
    pub label: Value<String>,
    pub color: Value<String>,
    pub length: Value<f64>,
    pub length_unit: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct CableResource;

#[async_trait::async_trait]
impl ResourceDef for CableResource {
    type Model = CableModel;
    type Response = Cable;

    const TYPE_NAME: &'static str = "cable";
    const ENDPOINT: &'static str = "dcim/cables";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::required(
                "a_terminations",
                AttributeKind::Terminations,
                "A-side terminations, e.g. {object_type = \"dcim.interface\", object_id = 10}.",
            ),
            Attribute::required("b_terminations", AttributeKind::Terminations, "B-side terminations."),
            Attribute::optional("type", AttributeKind::String, "Cable type, e.g. cat6 or smf."),
            Attribute::optional("status", AttributeKind::String, "Cable status.")
                .one_of(CABLE_STATUSES)
                .default_value(json!("connected")),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            Attribute::optional("label", AttributeKind::String, "Cable label."),
            Attribute::optional("color", AttributeKind::String, "Color in 6-digit hex format.")
                .validate_with(Validator::HexColor),
            Attribute::optional("length", AttributeKind::Float64, "Cable length."),
            Attribute::optional("length_unit", AttributeKind::String, "Unit of the length.").one_of(LENGTH_UNITS),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a cable between two sets of terminations in NetBox.", attributes)
    }

    fn id(&self, model: &CableModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut CableModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &CableModel,
        _prior: Option<&CableModel>,
    ) -> Result<RequestBody, ProviderError> {
        if plan.length.is_known() && plan.length_unit.is_null() {
            return Err(ProviderError::validation("length_unit", "must be set when length is set"));
        }

        let mut body = RequestBody::new();
        body.optional("a_terminations", &plan.a_terminations)?
            .optional("b_terminations", &plan.b_terminations)?
            .optional("status", &plan.status)?
            .nullable("length", &plan.length)?
            .nullable("length_unit", &plan.length_unit)?;
        body.text("type", &plan.cable_type)
            .text("label", &plan.label)
            .text("color", &plan.color)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        Ok(body)
    }

    fn apply_response(&self, cable: &Cable, model: &mut CableModel) {
        model.id = Value::known(cable.id.to_string());
        model.a_terminations = Value::Known(cable.a_terminations.clone());
        model.b_terminations = Value::Known(cable.b_terminations.clone());
        model.cable_type = choice_from_api(cable.cable_type.as_ref());
        model.status = choice_from_api(cable.status.as_ref());
        model.tenant = reference::read_back(&model.tenant, cable.tenant.as_ref());
        model.label = string_from_api(&model.label, &cable.label);
        model.color = string_from_api(&model.color, &cable.color);
        model.length = cable.length.into();
        model.length_unit = choice_from_api(cable.length_unit.as_ref());
        model.description = string_from_api(&model.description, &cable.description);
        model.comments = string_from_api(&model.comments, &cable.comments);
    }

    fn metadata<'a>(&self, model: &'a mut CableModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}
