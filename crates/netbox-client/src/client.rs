//! NetBox API client
//!
//! Implements [`NetBoxApi`] over the NetBox REST API.
//! Every endpoint follows the same layout: `/api/{app}/{model}/` for the
//! collection and `/api/{app}/{model}/{id}/` for a single object.

use crate::common::query::{detail_path, query_resources, collection_path};
use crate::common::HttpClient;
use crate::error::NetBoxError;
use crate::netbox_trait::NetBoxApi;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Request timeout applied to every call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// NetBox API client
#[derive(Debug, Clone)]
pub struct NetBoxClient {
    http: HttpClient,
}

impl NetBoxClient {
    /// Create a new NetBox client
    ///
    /// # Arguments
    /// * `base_url` - NetBox base URL (e.g., "http://netbox:80")
    /// * `token` - API token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, NetBoxError> {
        Self::with_options(base_url, token, false)
    }

    /// Create a client, optionally skipping TLS certificate verification
    pub fn with_options(base_url: String, token: String, insecure: bool) -> Result<Self, NetBoxError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(NetBoxError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    /// Underlying authenticated HTTP wrapper
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

#[async_trait::async_trait]
impl NetBoxApi for NetBoxClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Validate the API token by making a simple authenticated request.
    ///
    /// The status endpoint is lightweight and requires authentication, so a
    /// 401/403 here means the token is unusable.
    async fn validate_token(&self) -> Result<(), NetBoxError> {
        debug!("Validating NetBox token and connectivity");
        let _: serde_json::Value = self.http.get("/api/status/").await?;
        debug!("Token validated successfully");
        Ok(())
    }

    async fn list(
        &self,
        endpoint: &str,
        filters: &[(&str, &str)],
        fetch_all: bool,
    ) -> Result<Vec<serde_json::Value>, NetBoxError> {
        query_resources(&self.http, endpoint, filters, fetch_all).await
    }

    async fn retrieve(&self, endpoint: &str, id: i32) -> Result<serde_json::Value, NetBoxError> {
        self.http.get(&detail_path(endpoint, id)).await
    }

    async fn create(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, NetBoxError> {
        self.http.post(&collection_path(endpoint), body).await
    }

    async fn update(
        &self,
        endpoint: &str,
        id: i32,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, NetBoxError> {
        self.http.put(&detail_path(endpoint, id), body).await
    }

    async fn partial_update(
        &self,
        endpoint: &str,
        id: i32,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, NetBoxError> {
        self.http.patch(&detail_path(endpoint, id), body).await
    }

    async fn destroy(&self, endpoint: &str, id: i32) -> Result<(), NetBoxError> {
        self.http.delete(&detail_path(endpoint, id)).await
    }
}
