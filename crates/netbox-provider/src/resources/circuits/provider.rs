//! Circuit provider resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::schema::{self, Schema};
use crate::value::Value;
use netbox_client::{CircuitProvider, NetBoxApi};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct ProviderResource;

#[async_trait::async_trait]
impl ResourceDef for ProviderResource {
    type Model = ProviderModel;
    type Response = CircuitProvider;

    const TYPE_NAME: &'static str = "provider";
    const ENDPOINT: &'static str = "circuits/providers";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.push(schema::comments());
        attributes.extend(schema::metadata());
        Schema::new("Manages a circuit provider (carrier) in NetBox.", attributes)
    }

    fn id(&self, model: &ProviderModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut ProviderModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &ProviderModel,
        _prior: Option<&ProviderModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        Ok(body)
    }

    fn apply_response(&self, provider: &CircuitProvider, model: &mut ProviderModel) {
        model.id = Value::known(provider.id.to_string());
        model.name = Value::known(provider.name.clone());
        model.slug = Value::known(provider.slug.clone());
        model.description = string_from_api(&model.description, &provider.description);
        model.comments = string_from_api(&model.comments, &provider.comments);
    }

    fn metadata<'a>(&self, model: &'a mut ProviderModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &ProviderModel) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};

    #[tokio::test]
    async fn test_comments_round_trip_and_clear() {
        let mock = mock();
        let exec = executor(&mock, ProviderResource);
        let plan = ProviderModel {
            name: known("Carrier"),
            slug: known("carrier"),
            ..ProviderModel::default()
        };

        let created = exec
            .create(ProviderModel {
                comments: known("NOC: +1 555 0100"),
                ..plan.clone()
            })
            .await
            .unwrap();
        assert_eq!(created.comments, known("NOC: +1 555 0100"));
        assert_eq!(created.description, Value::Null);

        let read = exec.read(created.clone()).await.unwrap().unwrap();
        assert_eq!(read, created);

        let updated = exec.update(plan, created).await.unwrap();
        assert_eq!(updated.comments, Value::Null);
    }

    #[tokio::test]
    async fn test_read_after_delete_is_gone() {
        let mock = mock();
        let exec = executor(&mock, ProviderResource);
        let created = exec
            .create(ProviderModel {
                name: known("Carrier"),
                slug: known("carrier"),
                ..ProviderModel::default()
            })
            .await
            .unwrap();

        exec.delete(created.clone()).await.unwrap();
        assert_eq!(mock.count("circuits/providers"), 0);
        assert!(exec.read(created).await.unwrap().is_none());
    }
}
