//! Generic CRUD executor
//!
//! Every resource implements the same lifecycle against its NetBox endpoint:
//!
//! 1. **Create**: build the request (resolving references), POST, map the
//!    response back onto the planned model.
//! 2. **Read**: GET by ID; a 404 means the object was deleted outside
//!    Terraform and the resource is dropped from state.
//! 3. **Update**: rebuild the full request against prior state and PUT it
//!    (PATCH for resources that only own a few fields of a parent object,
//!    which may also move to a different parent).
//! 4. **Delete**: DELETE by ID; a 404 counts as success.
//! 5. **ImportState**: seed a model with only the ID; the host then reads.
//!
//! A [`ResourceDef`] supplies only what differs per resource: schema, request
//! building and response mapping. [`ResourceExecutor`] runs the lifecycle and
//! exposes it to the host as a JSON-level [`ManagedResource`].

use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{parse_id, RequestBody};
use crate::metadata::Metadata;
use crate::schema::{Plan, Schema};
use netbox_client::{NetBoxApi, NetBoxError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as Json;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// How Update submits changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// PUT the full object
    Replace,
    /// PATCH only the fields the resource owns
    Partial,
}

/// What Create does when NetBox reports a uniqueness violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Surface the API error as is
    Fail,
    /// Fail, naming the existing object and how to import it
    ImportHint,
    /// Take over the existing object and update it to match configuration
    Adopt,
}

/// Per-resource behaviour plugged into [`ResourceExecutor`]
#[async_trait::async_trait]
pub trait ResourceDef: Send + Sync + 'static {
    /// State model as stored by the host
    type Model: Serialize + DeserializeOwned + Clone + Default + Debug + Send + Sync;
    /// Decoded API object
    type Response: DeserializeOwned + Send;

    /// Resource type name without the `netbox_` prefix
    const TYPE_NAME: &'static str;
    /// Endpoint below `/api/`
    const ENDPOINT: &'static str;
    const UPDATE_MODE: UpdateMode = UpdateMode::Replace;
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::Fail;

    fn schema(&self) -> Schema;

    /// NetBox ID held in the model
    fn id(&self, model: &Self::Model) -> Result<i32, ProviderError>;

    fn set_id(&self, model: &mut Self::Model, id: i32);

    /// Request body for create (`prior = None`) or update
    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &Self::Model,
        prior: Option<&Self::Model>,
    ) -> Result<RequestBody, ProviderError>;

    /// Copy API values onto the model
    fn apply_response(&self, response: &Self::Response, model: &mut Self::Model);

    /// Tags and custom fields, for resources that carry them
    fn metadata<'a>(&self, _model: &'a mut Self::Model) -> Option<&'a mut Metadata> {
        None
    }

    /// Unique field used to find the object a conflicting create collided with
    fn unique_key(&self, _model: &Self::Model) -> Option<(&'static str, String)> {
        None
    }

    /// Submit a create request
    async fn submit_create(
        &self,
        api: &dyn NetBoxApi,
        _plan: &Self::Model,
        body: &Json,
    ) -> Result<Json, NetBoxError> {
        api.create(Self::ENDPOINT, body).await
    }

    /// Submit an update request for the object recorded as `id`
    async fn submit_update(
        &self,
        api: &dyn NetBoxApi,
        id: i32,
        _plan: &Self::Model,
        body: &Json,
    ) -> Result<Json, NetBoxError> {
        match Self::UPDATE_MODE {
            UpdateMode::Replace => api.update(Self::ENDPOINT, id, body).await,
            UpdateMode::Partial => api.partial_update(Self::ENDPOINT, id, body).await,
        }
    }

    /// Submit a delete request
    async fn submit_delete(&self, api: &dyn NetBoxApi, id: i32) -> Result<(), NetBoxError> {
        api.destroy(Self::ENDPOINT, id).await
    }
}

/// Runs the CRUD lifecycle for one resource type
pub struct ResourceExecutor<R: ResourceDef> {
    api: Arc<dyn NetBoxApi>,
    def: R,
}

impl<R: ResourceDef> std::fmt::Debug for ResourceExecutor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceExecutor")
            .field("type_name", &R::TYPE_NAME)
            .field("endpoint", &R::ENDPOINT)
            .finish()
    }
}

impl<R: ResourceDef> ResourceExecutor<R> {
    pub fn new(api: Arc<dyn NetBoxApi>, def: R) -> Self {
        Self { api, def }
    }

    /// Host-facing type name, e.g. `netbox_cluster_group`
    pub fn type_name(&self) -> String {
        format!("netbox_{}", R::TYPE_NAME)
    }

    fn api(&self) -> &dyn NetBoxApi {
        self.api.as_ref()
    }

    fn read_into(&self, raw: &Json, model: &mut R::Model) -> Result<(), ProviderError> {
        let response: R::Response = serde_json::from_value(raw.clone())?;
        self.def.apply_response(&response, model);
        if let Some(metadata) = self.def.metadata(model) {
            metadata.read_back(raw);
        }
        Ok(())
    }

    /// Create the object described by `plan`
    pub async fn create(&self, plan: R::Model) -> Result<R::Model, ProviderError> {
        let kind = self.type_name();
        debug!("Creating {} in NetBox", kind);

        let mut state = plan;
        let mut body = self.def.build_request(self.api(), &state, None).await?;
        if let Some(metadata) = self.def.metadata(&mut state) {
            metadata.apply_create(body.fields_mut())?;
        }
        let body = body.into_json();

        let raw = match self.def.submit_create(self.api(), &state, &body).await {
            Ok(raw) => raw,
            Err(e) => return self.handle_create_error(state, e).await,
        };

        self.read_into(&raw, &mut state)?;
        info!("Created {} in NetBox (ID: {})", kind, self.def.id(&state)?);
        Ok(state)
    }

    async fn handle_create_error(&self, plan: R::Model, err: NetBoxError) -> Result<R::Model, ProviderError> {
        let kind = self.type_name();
        let key = self.def.unique_key(&plan);
        let (field, value) = match (R::CONFLICT_POLICY, key) {
            (ConflictPolicy::Fail, _) | (_, None) => {
                error!("Failed to create {} in NetBox: {}", kind, err);
                return Err(ProviderError::api(format!("creating {}", kind), err));
            }
            (_, Some(key)) if err.duplicate_fields().iter().any(|f| f == key.0) => key,
            _ => return Err(ProviderError::api(format!("creating {}", kind), err)),
        };

        let existing = lookup::find_existing(self.api(), R::ENDPOINT, field, &value)
            .await
            .map_err(|e| {
                error!("{} create conflicted on {} {:?} and the existing object could not be listed: {}", kind, field, value, e);
                ProviderError::api(format!("looking up existing {} by {}", kind, field), e)
            })?;

        match (R::CONFLICT_POLICY, existing) {
            (ConflictPolicy::Adopt, Some(id)) => {
                warn!("{} with {} {:?} already exists in NetBox (ID: {}), adopting it", kind, field, value, id);
                let mut prior = R::Model::default();
                self.def.set_id(&mut prior, id);
                let mut plan = plan;
                self.def.set_id(&mut plan, id);
                self.update(plan, prior).await
            }
            (_, existing) => {
                let hint = match existing {
                    Some(id) => format!("Import it with: terraform import {}.<name> {}", kind, id),
                    None => format!(
                        "Import it with: terraform import {}.<name> <id>, or choose a different {}",
                        kind, field
                    ),
                };
                Err(ProviderError::Duplicate {
                    resource: kind,
                    field: field.to_string(),
                    value,
                    existing_id: existing,
                    hint,
                })
            }
        }
    }

    /// Refresh `state` from NetBox; `None` when the object no longer exists
    pub async fn read(&self, state: R::Model) -> Result<Option<R::Model>, ProviderError> {
        let kind = self.type_name();
        let id = self.def.id(&state)?;
        debug!("Reading {} (ID: {}) from NetBox", kind, id);

        match self.api().retrieve(R::ENDPOINT, id).await {
            Ok(raw) => {
                let mut state = state;
                self.read_into(&raw, &mut state)?;
                Ok(Some(state))
            }
            Err(e) if e.is_not_found() => {
                warn!("{} (ID: {}) was deleted in NetBox, removing from state", kind, id);
                Ok(None)
            }
            Err(e) => Err(ProviderError::api(format!("reading {} (ID: {})", kind, id), e)),
        }
    }

    /// Apply `plan` to the object recorded in `prior`
    pub async fn update(&self, plan: R::Model, prior: R::Model) -> Result<R::Model, ProviderError> {
        let kind = self.type_name();
        let id = self.def.id(&prior).or_else(|_| self.def.id(&plan))?;
        debug!("Updating {} (ID: {}) in NetBox", kind, id);

        let mut state = plan;
        self.def.set_id(&mut state, id);
        let mut body = self.def.build_request(self.api(), &state, Some(&prior)).await?;

        let mut prior = prior;
        let prior_metadata = self.def.metadata(&mut prior).cloned().unwrap_or_default();
        if let Some(metadata) = self.def.metadata(&mut state) {
            metadata.apply_update(&prior_metadata, body.fields_mut())?;
        }
        let body = body.into_json();

        let result = self.def.submit_update(self.api(), id, &state, &body).await;
        let raw = result.map_err(|e| {
            error!("Failed to update {} (ID: {}) in NetBox: {}", kind, id, e);
            ProviderError::api(format!("updating {} (ID: {})", kind, id), e)
        })?;

        self.read_into(&raw, &mut state)?;
        info!("Updated {} in NetBox (ID: {})", kind, id);
        Ok(state)
    }

    /// Delete the object; an object that is already gone is not an error
    pub async fn delete(&self, state: R::Model) -> Result<(), ProviderError> {
        let kind = self.type_name();
        let id = self.def.id(&state)?;

        match self.def.submit_delete(self.api(), id).await {
            Ok(()) => {
                info!("Deleted {} from NetBox (ID: {})", kind, id);
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                debug!("{} (ID: {}) already deleted in NetBox", kind, id);
                Ok(())
            }
            Err(e) => Err(ProviderError::api(format!("deleting {} (ID: {})", kind, id), e)),
        }
    }

    /// Seed state for `terraform import`; the host reads it next
    pub fn import_state(&self, raw_id: &str) -> Result<R::Model, ProviderError> {
        let id = parse_id(raw_id)?;
        let mut model = R::Model::default();
        self.def.set_id(&mut model, id);
        Ok(model)
    }
}

/// Object-safe, JSON-level view of a resource used by the provider and host
#[async_trait::async_trait]
pub trait ManagedResource: Send + Sync + Debug {
    fn type_name(&self) -> String;

    fn schema(&self) -> Schema;

    fn validate(&self, config: &Json) -> Result<(), ProviderError> {
        self.schema().validate(config)
    }

    fn plan(&self, config: &Json, prior: Option<&Json>) -> Result<Plan, ProviderError> {
        self.schema().plan(config, prior)
    }

    async fn create(&self, plan: Json) -> Result<Json, ProviderError>;

    async fn read(&self, state: Json) -> Result<Option<Json>, ProviderError>;

    async fn update(&self, plan: Json, prior: Json) -> Result<Json, ProviderError>;

    async fn delete(&self, state: Json) -> Result<(), ProviderError>;

    fn import_state(&self, id: &str) -> Result<Json, ProviderError>;
}

#[async_trait::async_trait]
impl<R: ResourceDef> ManagedResource for ResourceExecutor<R> {
    fn type_name(&self) -> String {
        ResourceExecutor::type_name(self)
    }

    fn schema(&self) -> Schema {
        self.def.schema()
    }

    async fn create(&self, plan: Json) -> Result<Json, ProviderError> {
        let plan: R::Model = serde_json::from_value(plan)?;
        Ok(serde_json::to_value(ResourceExecutor::create(self, plan).await?)?)
    }

    async fn read(&self, state: Json) -> Result<Option<Json>, ProviderError> {
        let state: R::Model = serde_json::from_value(state)?;
        ResourceExecutor::read(self, state)
            .await?
            .map(|s| serde_json::to_value(s).map_err(ProviderError::from))
            .transpose()
    }

    async fn update(&self, plan: Json, prior: Json) -> Result<Json, ProviderError> {
        let plan: R::Model = serde_json::from_value(plan)?;
        let prior: R::Model = serde_json::from_value(prior)?;
        Ok(serde_json::to_value(ResourceExecutor::update(self, plan, prior).await?)?)
    }

    async fn delete(&self, state: Json) -> Result<(), ProviderError> {
        let state: R::Model = serde_json::from_value(state)?;
        ResourceExecutor::delete(self, state).await
    }

    fn import_state(&self, id: &str) -> Result<Json, ProviderError> {
        Ok(serde_json::to_value(ResourceExecutor::import_state(self, id)?)?)
    }
}

/// Box a resource definition for the provider registry
pub fn managed<R: ResourceDef>(api: &Arc<dyn NetBoxApi>, def: R) -> Arc<dyn ManagedResource> {
    Arc::new(ResourceExecutor::new(Arc::clone(api), def))
}
