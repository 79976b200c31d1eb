//! Tag resource
//!
//! Tags are often created by hand or by other tooling before Terraform
//! manages them, so a create that collides on slug takes over the existing
//! tag instead of failing.

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, Tag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub color: Value<String>,
    pub description: Value<String>,
    pub object_types: Value<BTreeSet<String>>,
}

#[derive(Debug, Default)]
pub struct TagResource;

#[async_trait::async_trait]
impl ResourceDef for TagResource {
    type Model = TagModel;
    type Response = Tag;

    const TYPE_NAME: &'static str = "tag";
    const ENDPOINT: &'static str = "extras/tags";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::Adopt;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.push(schema::color());
        attributes.push(Attribute::optional(
            "object_types",
            AttributeKind::StringList,
            "Object types the tag may be applied to, e.g. dcim.device. Empty allows all.",
        ));
        Schema::new("Manages a tag in NetBox.", attributes)
    }

    fn id(&self, model: &TagModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut TagModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &TagModel,
        _prior: Option<&TagModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description);
        body.optional("color", &plan.color)?;
        let object_types = plan.object_types.as_known().cloned().unwrap_or_default();
        body.set("object_types", serde_json::to_value(object_types)?);
        Ok(body)
    }

    fn apply_response(&self, tag: &Tag, model: &mut TagModel) {
        model.id = Value::known(tag.id.to_string());
        model.name = Value::known(tag.name.clone());
        model.slug = Value::known(tag.slug.clone());
        model.color = string_from_api(&model.color, &tag.color);
        model.description = string_from_api(&model.description, &tag.description);
        // An empty list and an unset attribute mean the same to NetBox
        model.object_types = if tag.object_types.is_empty() && !model.object_types.is_known() {
            Value::Null
        } else {
            Value::Known(tag.object_types.iter().cloned().collect())
        };
    }

    fn unique_key(&self, model: &TagModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}
