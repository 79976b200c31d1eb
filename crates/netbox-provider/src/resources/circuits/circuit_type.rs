//! Circuit type resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::schema::{self, Schema};
use crate::value::Value;
use netbox_client::{CircuitType, NetBoxApi};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitTypeModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub color: Value<String>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct CircuitTypeResource;

#[async_trait::async_trait]
impl ResourceDef for CircuitTypeResource {
    type Model = CircuitTypeModel;
    type Response = CircuitType;

    const TYPE_NAME: &'static str = "circuit_type";
    const ENDPOINT: &'static str = "circuits/circuit-types";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.push(schema::color());
        attributes.extend(schema::metadata());
        Schema::new("Manages a circuit type (e.g. Internet transit, MPLS) in NetBox.", attributes)
    }

    fn id(&self, model: &CircuitTypeModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut CircuitTypeModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &CircuitTypeModel,
        _prior: Option<&CircuitTypeModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description);
        body.optional("color", &plan.color)?;
        Ok(body)
    }

    fn apply_response(&self, circuit_type: &CircuitType, model: &mut CircuitTypeModel) {
        model.id = Value::known(circuit_type.id.to_string());
        model.name = Value::known(circuit_type.name.clone());
        model.slug = Value::known(circuit_type.slug.clone());
        model.color = string_from_api(&model.color, &circuit_type.color);
        model.description = string_from_api(&model.description, &circuit_type.description);
    }

    fn metadata<'a>(&self, model: &'a mut CircuitTypeModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &CircuitTypeModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}
