//! Resource catalogue
//!
//! One module per NetBox app, mirroring the API layout. Each app module
//! registers its resources with [`all`].

pub mod circuits;
pub mod dcim;
pub mod extras;
pub mod ipam;
pub mod organizational;
pub mod tenancy;
pub mod virtualization;

use crate::crud::ManagedResource;
use netbox_client::NetBoxApi;
use std::sync::Arc;

/// Every resource the provider serves, bound to `api`
pub fn all(api: &Arc<dyn NetBoxApi>) -> Vec<Arc<dyn ManagedResource>> {
    let mut resources = Vec::new();
    tenancy::register(api, &mut resources);
    dcim::register(api, &mut resources);
    ipam::register(api, &mut resources);
    extras::register(api, &mut resources);
    virtualization::register(api, &mut resources);
    circuits::register(api, &mut resources);
    resources
}
