//! Rack resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{
    choice_from_api, int_choice_from_api, model_id, optional_string_from_api, string_from_api, RequestBody,
};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, Rack};
use serde::{Deserialize, Serialize};
use serde_json::json;

const RACK_STATUSES: &[&str] = &["reserved", "available", "planned", "active", "deprecated"];
const FORM_FACTORS: &[&str] = &[
    "2-post-frame",
    "4-post-frame",
    "4-post-cabinet",
    "wall-frame",
    "wall-frame-vertical",
    "wall-cabinet",
    "wall-cabinet-vertical",
];
const OUTER_UNITS: &[&str] = &["mm", "in"];
const AIRFLOWS: &[&str] = &["front-to-rear", "rear-to-front"];
const WEIGHT_UNITS: &[&str] = &["kg", "g", "lb", "oz"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RackModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub site: Value<String>,
    pub location: Value<String>,
    pub tenant: Value<String>,
    pub status: Value<String>,
    pub role: Value<String>,
    pub serial: Value<String>,
    pub asset_tag: Value<String>,
    pub form_factor: Value<String>,
    pub width: Value<i64>,
    pub u_height: Value<i64>,
    pub starting_unit: Value<i64>,
    pub desc_units: Value<bool>,
    pub outer_width: Value<i64>,
    pub outer_depth: Value<i64>,
    pub outer_unit: Value<String>,
    pub mounting_depth: Value<i64>,
    pub airflow: Value<String>,
    pub weight: Value<f64>,
    pub max_weight: Value<i64>,
    pub weight_unit: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct RackResource;

#[async_trait::async_trait]
impl ResourceDef for RackResource {
    type Model = RackModel;
    type Response = Rack;

    const TYPE_NAME: &'static str = "rack";
    const ENDPOINT: &'static str = "dcim/racks";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::name(),
            schema::required_reference("site", "Site (ID, name or slug)."),
            schema::reference("location", "Location within the site (ID, name or slug)."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            schema::status(RACK_STATUSES),
            schema::reference("role", "Rack role (ID, name or slug)."),
            Attribute::optional("serial", AttributeKind::String, "Serial number."),
            Attribute::optional("asset_tag", AttributeKind::String, "Unique asset tag."),
            Attribute::optional("form_factor", AttributeKind::String, "Physical form factor.").one_of(FORM_FACTORS),
            Attribute::optional("width", AttributeKind::Int64, "Rail-to-rail width in inches (10, 19, 21 or 23).")
                .computed(),
            Attribute::optional("u_height", AttributeKind::Int64, "Height in rack units.")
                .validate_with(schema::Validator::Range(1, 100))
                .computed(),
            Attribute::optional("starting_unit", AttributeKind::Int64, "Number of the lowest unit.").computed(),
            Attribute::optional("desc_units", AttributeKind::Bool, "Units are numbered top-to-bottom.").computed(),
            Attribute::optional("outer_width", AttributeKind::Int64, "Outer dimension of the rack (width)."),
            Attribute::optional("outer_depth", AttributeKind::Int64, "Outer dimension of the rack (depth)."),
            Attribute::optional("outer_unit", AttributeKind::String, "Unit of the outer dimensions.").one_of(OUTER_UNITS),
            Attribute::optional("mounting_depth", AttributeKind::Int64, "Maximum depth of a mounted device, in millimeters."),
            Attribute::optional("airflow", AttributeKind::String, "Direction of airflow.").one_of(AIRFLOWS),
            Attribute::optional("weight", AttributeKind::Float64, "Weight of the empty rack."),
            Attribute::optional("max_weight", AttributeKind::Int64, "Maximum load capacity."),
            Attribute::optional("weight_unit", AttributeKind::String, "Unit of the weights.").one_of(WEIGHT_UNITS),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a rack in NetBox.", attributes)
    }

    fn id(&self, model: &RackModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut RackModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &RackModel,
        _prior: Option<&RackModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.optional_int32("width", &plan.width)?
            .optional_int32("u_height", &plan.u_height)?
            .optional_int32("starting_unit", &plan.starting_unit)?
            .int32("outer_width", &plan.outer_width)?
            .int32("outer_depth", &plan.outer_depth)?
            .int32("mounting_depth", &plan.mounting_depth)?
            .int32("max_weight", &plan.max_weight)?;

        body.text("name", &plan.name)
            .text("serial", &plan.serial)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.optional("status", &plan.status)?
            .optional("desc_units", &plan.desc_units)?
            .nullable("asset_tag", &plan.asset_tag)?
            .nullable("form_factor", &plan.form_factor)?
            .nullable("outer_unit", &plan.outer_unit)?
            .nullable("airflow", &plan.airflow)?
            .nullable("weight", &plan.weight)?
            .nullable("weight_unit", &plan.weight_unit)?;

        body.required_reference(api, &lookup::SITE, "site", &plan.site).await?;
        body.reference(api, &lookup::LOCATION, "location", &plan.location).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        body.reference(api, &lookup::RACK_ROLE, "role", &plan.role).await?;

        // NetBox requires a unit whenever a dimension or weight is given
        if body.get("outer_unit").is_some_and(|u| u.is_null())
            && (plan.outer_width.is_known() || plan.outer_depth.is_known())
        {
            return Err(ProviderError::validation(
                "outer_unit",
                "must be set when outer_width or outer_depth is set",
            ));
        }
        if body.get("weight_unit").is_some_and(|u| u.is_null())
            && (plan.weight.is_known() || plan.max_weight.is_known())
        {
            body.set("weight_unit", json!("kg"));
        }
        Ok(body)
    }

    fn apply_response(&self, rack: &Rack, model: &mut RackModel) {
        model.id = Value::known(rack.id.to_string());
        model.name = Value::known(rack.name.clone());
        model.site = reference::read_back(&model.site, rack.site.as_ref());
        model.location = reference::read_back(&model.location, rack.location.as_ref());
        model.tenant = reference::read_back(&model.tenant, rack.tenant.as_ref());
        model.status = choice_from_api(rack.status.as_ref());
        model.role = reference::read_back(&model.role, rack.role.as_ref());
        model.serial = optional_string_from_api(&model.serial, rack.serial.as_deref());
        model.asset_tag = optional_string_from_api(&model.asset_tag, rack.asset_tag.as_deref());
        model.form_factor = choice_from_api(rack.form_factor.as_ref());
        model.width = int_choice_from_api(rack.width.as_ref());
        model.u_height = rack.u_height.into();
        model.starting_unit = rack.starting_unit.into();
        model.desc_units = rack.desc_units.into();
        model.outer_width = rack.outer_width.into();
        model.outer_depth = rack.outer_depth.into();
        model.outer_unit = choice_from_api(rack.outer_unit.as_ref());
        model.mounting_depth = rack.mounting_depth.into();
        model.airflow = choice_from_api(rack.airflow.as_ref());
        model.weight = rack.weight.into();
        model.max_weight = rack.max_weight.into();
        // Implicit "kg" stays out of state when the user set no unit
        model.weight_unit = match (&model.weight_unit, choice_from_api(rack.weight_unit.as_ref())) {
            (Value::Null, Value::Known(unit)) if unit == "kg" => Value::Null,
            (_, unit) => unit,
        };
        model.description = string_from_api(&model.description, &rack.description);
        model.comments = string_from_api(&model.comments, &rack.comments);
    }

    fn metadata<'a>(&self, model: &'a mut RackModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}
