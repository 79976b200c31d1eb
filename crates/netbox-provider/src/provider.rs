//! Provider configuration and resource registry
//!
//! The provider starts unconfigured: schemas, validation and planning work
//! straight away, while operations that reach NetBox wait for a configure
//! request to bind a validated client.

use crate::config::ProviderConfig;
use crate::crud::ManagedResource;
use crate::error::ProviderError;
use crate::resources;
use netbox_client::{NetBoxApi, NetBoxClient, NetBoxError};
use serde::Serialize;
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{error, info};

/// Provider type name as seen by the host
pub const PROVIDER_NAME: &str = "netbox";

/// Identity reported to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub type_name: &'static str,
    pub version: &'static str,
}

/// Stand-in client for resources registered before configure
struct Unconfigured;

impl Unconfigured {
    fn error() -> NetBoxError {
        NetBoxError::InvalidRequest("provider not configured".to_string())
    }
}

#[async_trait::async_trait]
impl NetBoxApi for Unconfigured {
    fn base_url(&self) -> &str {
        ""
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        Err(Self::error())
    }

    async fn list(
        &self,
        _endpoint: &str,
        _filters: &[(&str, &str)],
        _fetch_all: bool,
    ) -> Result<Vec<Json>, NetBoxError> {
        Err(Self::error())
    }

    async fn retrieve(&self, _endpoint: &str, _id: i32) -> Result<Json, NetBoxError> {
        Err(Self::error())
    }

    async fn create(&self, _endpoint: &str, _body: &Json) -> Result<Json, NetBoxError> {
        Err(Self::error())
    }

    async fn update(&self, _endpoint: &str, _id: i32, _body: &Json) -> Result<Json, NetBoxError> {
        Err(Self::error())
    }

    async fn partial_update(&self, _endpoint: &str, _id: i32, _body: &Json) -> Result<Json, NetBoxError> {
        Err(Self::error())
    }

    async fn destroy(&self, _endpoint: &str, _id: i32) -> Result<(), NetBoxError> {
        Err(Self::error())
    }
}

/// Every resource bound to one client
struct Registry {
    resources: BTreeMap<String, Arc<dyn ManagedResource>>,
    configured: bool,
}

impl Registry {
    fn bind(api: Arc<dyn NetBoxApi>, configured: bool) -> Self {
        let resources = resources::all(&api)
            .into_iter()
            .map(|r| (r.type_name(), r))
            .collect();
        Self {
            resources,
            configured,
        }
    }
}

/// The provider: one NetBox client shared by every resource once configured
pub struct NetBoxProvider {
    registry: RwLock<Arc<Registry>>,
}

impl fmt::Debug for NetBoxProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry();
        f.debug_struct("NetBoxProvider")
            .field("resources", &registry.resources.len())
            .field("configured", &registry.configured)
            .finish()
    }
}

impl NetBoxProvider {
    /// Provider bound to an existing API client
    pub fn new(api: Arc<dyn NetBoxApi>) -> Self {
        Self {
            registry: RwLock::new(Arc::new(Registry::bind(api, true))),
        }
    }

    /// Provider waiting for a configure request
    pub fn unconfigured() -> Self {
        Self {
            registry: RwLock::new(Arc::new(Registry::bind(Arc::new(Unconfigured), false))),
        }
    }

    fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Check the token against `api`, then bind every resource to it
    pub async fn connect(&self, api: Arc<dyn NetBoxApi>) -> Result<(), ProviderError> {
        info!("Validating NetBox token and connectivity at {}", api.base_url());
        api.validate_token().await.map_err(|e| {
            error!("Failed to validate NetBox token: {}", e);
            ProviderError::api("validating NetBox token", e)
        })?;
        info!("NetBox token validated");

        let registry = Arc::new(Registry::bind(api, true));
        *self.registry.write().unwrap_or_else(PoisonError::into_inner) = registry;
        Ok(())
    }

    /// Build the NetBox client described by `config` and connect to it
    pub async fn configure(&self, config: &ProviderConfig) -> Result<(), ProviderError> {
        info!("Configuring NetBox provider for {}", config.server_url);
        let client = NetBoxClient::with_options(
            config.server_url.clone(),
            config.api_token.clone(),
            config.insecure,
        )
        .map_err(|e| ProviderError::api("building NetBox client", e))?;
        self.connect(Arc::new(client)).await
    }

    pub fn is_configured(&self) -> bool {
        self.registry().configured
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_NAME,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Look up a resource by its host-facing type name
    pub fn resource(&self, type_name: &str) -> Result<Arc<dyn ManagedResource>, ProviderError> {
        self.registry()
            .resources
            .get(type_name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    /// Look up a resource for an operation that talks to NetBox
    pub fn configured_resource(
        &self,
        type_name: &str,
        operation: &str,
    ) -> Result<Arc<dyn ManagedResource>, ProviderError> {
        let registry = self.registry();
        let resource = registry
            .resources
            .get(type_name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))?;
        if !registry.configured {
            return Err(ProviderError::NotConfigured(format!("{} {}", operation, type_name)));
        }
        Ok(resource)
    }

    /// All resource type names, sorted
    pub fn resource_types(&self) -> Vec<String> {
        self.registry().resources.keys().cloned().collect()
    }
}
