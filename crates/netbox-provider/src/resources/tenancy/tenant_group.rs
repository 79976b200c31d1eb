//! Tenant group resource

use crate::lookup::{self, LookupTarget};
use crate::resources::organizational::{Hierarchical, HierarchicalKind, OrganizationalKind};

#[derive(Debug)]
pub struct TenantGroupKind;

impl OrganizationalKind for TenantGroupKind {
    const TYPE_NAME: &'static str = "tenant_group";
    const ENDPOINT: &'static str = "tenancy/tenant-groups";
    const DESCRIPTION: &'static str = "Manages a tenant group in NetBox. Tenant groups can be nested.";
}

impl HierarchicalKind for TenantGroupKind {
    const PARENT: LookupTarget = lookup::TENANT_GROUP;
}

pub type TenantGroupResource = Hierarchical<TenantGroupKind>;
