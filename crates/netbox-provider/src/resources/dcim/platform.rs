//! Platform resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, Platform};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub manufacturer: Value<String>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct PlatformResource;

#[async_trait::async_trait]
impl ResourceDef for PlatformResource {
    type Model = PlatformModel;
    type Response = Platform;

    const TYPE_NAME: &'static str = "platform";
    const ENDPOINT: &'static str = "dcim/platforms";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.push(schema::reference(
            "manufacturer",
            "Manufacturer the platform is limited to (ID, name or slug).",
        ));
        attributes.extend(schema::metadata());
        Schema::new("Manages a platform (operating system or firmware) in NetBox.", attributes)
    }

    fn id(&self, model: &PlatformModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut PlatformModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &PlatformModel,
        _prior: Option<&PlatformModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description);
        body.reference(api, &lookup::MANUFACTURER, "manufacturer", &plan.manufacturer)
            .await?;
        Ok(body)
    }

    fn apply_response(&self, platform: &Platform, model: &mut PlatformModel) {
        model.id = Value::known(platform.id.to_string());
        model.name = Value::known(platform.name.clone());
        model.slug = Value::known(platform.slug.clone());
        model.manufacturer = reference::read_back(&model.manufacturer, platform.manufacturer.as_ref());
        model.description = string_from_api(&model.description, &platform.description);
    }

    fn metadata<'a>(&self, model: &'a mut PlatformModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &PlatformModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}
