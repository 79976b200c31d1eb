//! Site group resource

use crate::lookup::{self, LookupTarget};
use crate::resources::organizational::{Hierarchical, HierarchicalKind, OrganizationalKind};

#[derive(Debug)]
pub struct SiteGroupKind;

impl OrganizationalKind for SiteGroupKind {
    const TYPE_NAME: &'static str = "site_group";
    const ENDPOINT: &'static str = "dcim/site-groups";
    const DESCRIPTION: &'static str = "Manages a site group in NetBox. Site groups are nested functional groupings of sites.";
}

impl HierarchicalKind for SiteGroupKind {
    const PARENT: LookupTarget = lookup::SITE_GROUP;
}

pub type SiteGroupResource = Hierarchical<SiteGroupKind>;
