//! Region resource

use crate::lookup::{self, LookupTarget};
use crate::resources::organizational::{Hierarchical, HierarchicalKind, OrganizationalKind};

#[derive(Debug)]
pub struct RegionKind;

impl OrganizationalKind for RegionKind {
    const TYPE_NAME: &'static str = "region";
    const ENDPOINT: &'static str = "dcim/regions";
    const DESCRIPTION: &'static str = "Manages a region in NetBox. Regions are nested geographic groupings of sites.";
}

impl HierarchicalKind for RegionKind {
    const PARENT: LookupTarget = lookup::REGION;
}

pub type RegionResource = Hierarchical<RegionKind>;
