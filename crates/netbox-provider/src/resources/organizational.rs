//! Organizational models
//!
//! Manufacturers, contact roles, cluster types/groups and the nested-set
//! groupings (regions, site groups, tenant groups, contact groups) share one
//! shape: name, slug, description and, for nested sets, a parent. The
//! per-model modules only name the endpoint.

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::lookup::LookupTarget;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Schema};
use crate::value::Value;
use netbox_client::{HierarchicalObject, NetBoxApi, OrganizationalObject};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Identifies one organizational model
pub trait OrganizationalKind: Send + Sync + 'static {
    const TYPE_NAME: &'static str;
    const ENDPOINT: &'static str;
    const DESCRIPTION: &'static str;
}

/// Identifies one nested-set model
pub trait HierarchicalKind: OrganizationalKind {
    /// Where `parent` references point
    const PARENT: LookupTarget;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationalModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchicalModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub slug: Value<String>,
    pub parent: Value<String>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

/// Resource for an [`OrganizationalKind`]
#[derive(Debug)]
pub struct Organizational<K>(PhantomData<K>);

impl<K> Default for Organizational<K> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

/// Resource for a [`HierarchicalKind`]
#[derive(Debug)]
pub struct Hierarchical<K>(PhantomData<K>);

impl<K> Default for Hierarchical<K> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

#[async_trait::async_trait]
impl<K: OrganizationalKind> ResourceDef for Organizational<K> {
    type Model = OrganizationalModel;
    type Response = OrganizationalObject;

    const TYPE_NAME: &'static str = K::TYPE_NAME;
    const ENDPOINT: &'static str = K::ENDPOINT;
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.extend(schema::metadata());
        Schema::new(K::DESCRIPTION, attributes)
    }

    fn id(&self, model: &Self::Model) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut Self::Model, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &Self::Model,
        _prior: Option<&Self::Model>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description);
        Ok(body)
    }

    fn apply_response(&self, response: &Self::Response, model: &mut Self::Model) {
        model.id = Value::known(response.id.to_string());
        model.name = Value::known(response.name.clone());
        model.slug = Value::known(response.slug.clone());
        model.description = string_from_api(&model.description, &response.description);
    }

    fn metadata<'a>(&self, model: &'a mut Self::Model) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &Self::Model) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}

#[async_trait::async_trait]
impl<K: HierarchicalKind> ResourceDef for Hierarchical<K> {
    type Model = HierarchicalModel;
    type Response = HierarchicalObject;

    const TYPE_NAME: &'static str = K::TYPE_NAME;
    const ENDPOINT: &'static str = K::ENDPOINT;
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = schema::organizational();
        attributes.push(schema::reference("parent", "Parent group (ID, name or slug)."));
        attributes.extend(schema::metadata());
        Schema::new(K::DESCRIPTION, attributes)
    }

    fn id(&self, model: &Self::Model) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut Self::Model, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &Self::Model,
        _prior: Option<&Self::Model>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("slug", &plan.slug)
            .text("description", &plan.description);
        body.reference(api, &K::PARENT, "parent", &plan.parent).await?;
        Ok(body)
    }

    fn apply_response(&self, response: &Self::Response, model: &mut Self::Model) {
        model.id = Value::known(response.id.to_string());
        model.name = Value::known(response.name.clone());
        model.slug = Value::known(response.slug.clone());
        model.parent = reference::read_back(&model.parent, response.parent.as_ref());
        model.description = string_from_api(&model.description, &response.description);
    }

    fn metadata<'a>(&self, model: &'a mut Self::Model) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &Self::Model) -> Option<(&'static str, String)> {
        model.slug.as_str().map(|s| ("slug", s.to_string()))
    }
}
