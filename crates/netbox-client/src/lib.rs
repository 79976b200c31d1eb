//! NetBox REST API Client
//!
//! A Rust client library for interacting with the NetBox REST API.
//! Every NetBox model is reached through the same endpoint-generic
//! [`NetBoxApi`] trait, with typed response models for decoding.
//!
//! # Example
//!
//! ```no_run
//! use netbox_client::{NetBoxApi, NetBoxClient, Site};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = NetBoxClient::new(
//!     "http://netbox:80".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//! client.validate_token().await?;
//!
//! // Create a site and decode the response
//! let raw = client
//!     .create("dcim/sites", &json!({"name": "HQ", "slug": "hq"}))
//!     .await?;
//! let _site: Site = serde_json::from_value(raw)?;
//!
//! // Query sites by slug
//! let _sites = client.list("dcim/sites", &[("slug", "hq")], false).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Generic CRUD**: list/retrieve/create/update/partial-update/destroy on any endpoint
//! - **Error taxonomy**: 404 and 401/403 are distinguished from other API failures
//! - **Pagination**: Support for fetching all pages of large result sets
//! - **Mocking**: `test-util` feature exposes an in-memory NetBox emulation

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod netbox_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::NetBoxClient;
pub use common::{HttpClient, PaginatedResponse};
pub use error::NetBoxError;
pub use models::*;
pub use netbox_trait::NetBoxApi;
#[cfg(feature = "test-util")]
pub use mock::{MockNetBoxClient, MockRequest};
