//! Tenancy resources

pub mod contact;
pub mod contact_assignment;
pub mod contact_group;
pub mod contact_role;
pub mod tenant;
pub mod tenant_group;

use crate::crud::{managed, ManagedResource};
use netbox_client::NetBoxApi;
use std::sync::Arc;

pub(crate) fn register(api: &Arc<dyn NetBoxApi>, resources: &mut Vec<Arc<dyn ManagedResource>>) {
    resources.push(managed(api, tenant_group::TenantGroupResource::default()));
    resources.push(managed(api, tenant::TenantResource));
    resources.push(managed(api, contact_group::ContactGroupResource::default()));
    resources.push(managed(api, contact_role::ContactRoleResource::default()));
    resources.push(managed(api, contact::ContactResource));
    resources.push(managed(api, contact_assignment::ContactAssignmentResource));
}
