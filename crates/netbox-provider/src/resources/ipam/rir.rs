//! RIR resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, Rir};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RirModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub is_private: Value<bool>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct RirResource;

#[async_trait::async_trait]
impl ResourceDef for RirResource {
    type Model = RirModel;
    type Response = Rir;

    const TYPE_NAME: &'static str = "rir";
    const ENDPOINT: &'static str = "ipam/rirs";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.push(
            Attribute::optional("is_private", AttributeKind::Bool, "IP space managed by this RIR is private.")
                .computed(),
        );
        attributes.extend(schema::metadata());
        Schema::new("Manages a Regional Internet Registry (RIR) in NetBox.", attributes)
    }

    fn id(&self, model: &RirModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut RirModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &RirModel,
        _prior: Option<&RirModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description);
        body.optional("is_private", &plan.is_private)?;
        Ok(body)
    }

    fn apply_response(&self, rir: &Rir, model: &mut RirModel) {
        model.id = Value::known(rir.id.to_string());
        model.name = Value::known(rir.name.clone());
        model.slug = Value::known(rir.slug.clone());
        model.is_private = rir.is_private.into();
        model.description = string_from_api(&model.description, &rir.description);
    }

    fn metadata<'a>(&self, model: &'a mut RirModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &RirModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}
