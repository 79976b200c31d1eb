//! NetBox API trait for mocking
//!
//! This trait abstracts the NetBox REST surface the provider needs so that
//! resources can be driven against the real [`crate::NetBoxClient`] or the
//! in-memory mock. Objects travel as raw JSON; typed decoding is left to the
//! caller so one trait covers every endpoint.

use crate::error::NetBoxError;

/// Trait for NetBox API client operations
///
/// `endpoint` is the path below `/api/`, e.g. `dcim/sites` or
/// `virtualization/cluster-groups`.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NetBoxApi: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API token
    async fn validate_token(&self) -> Result<(), NetBoxError>;

    /// List objects of an endpoint matching all `filters`
    async fn list(
        &self,
        endpoint: &str,
        filters: &[(&str, &str)],
        fetch_all: bool,
    ) -> Result<Vec<serde_json::Value>, NetBoxError>;

    /// Retrieve one object by ID
    async fn retrieve(&self, endpoint: &str, id: i32) -> Result<serde_json::Value, NetBoxError>;

    /// Create an object (POST)
    async fn create(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, NetBoxError>;

    /// Replace an object (PUT)
    async fn update(
        &self,
        endpoint: &str,
        id: i32,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, NetBoxError>;

    /// Modify selected fields of an object (PATCH)
    async fn partial_update(
        &self,
        endpoint: &str,
        id: i32,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, NetBoxError>;

    /// Delete an object
    async fn destroy(&self, endpoint: &str, id: i32) -> Result<(), NetBoxError>;
}
