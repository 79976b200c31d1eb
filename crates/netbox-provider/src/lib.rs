//! NetBox Terraform provider
//!
//! Exposes NetBox objects (tenancy, DCIM, IPAM, extras, virtualization and
//! circuits) as Terraform-managed resources. Each resource is a
//! [`crud::ResourceDef`] describing its schema and the mapping between state
//! and the NetBox API; [`crud::ResourceExecutor`] runs the shared
//! create/read/update/delete/import lifecycle for all of them.
//!
//! The [`host`] module speaks a JSON-lines RPC protocol on stdin/stdout and is
//! what the `terraform-provider-netbox` binary runs.

pub mod config;
pub mod crud;
pub mod error;
pub mod host;
pub mod lookup;
pub mod mapping;
pub mod metadata;
pub mod provider;
pub mod reference;
pub mod resources;
pub mod schema;
pub mod value;

#[cfg(test)]
mod test_utils;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use provider::NetBoxProvider;
