//! Circuits resources

pub mod circuit;
pub mod circuit_termination;
pub mod circuit_type;
pub mod provider;

use crate::crud::{managed, ManagedResource};
use netbox_client::NetBoxApi;
use std::sync::Arc;

pub(crate) fn register(api: &Arc<dyn NetBoxApi>, resources: &mut Vec<Arc<dyn ManagedResource>>) {
    resources.push(managed(api, provider::ProviderResource));
    resources.push(managed(api, circuit_type::CircuitTypeResource));
    resources.push(managed(api, circuit::CircuitResource));
    resources.push(managed(api, circuit_termination::CircuitTerminationResource));
}
