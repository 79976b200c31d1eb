//! Cluster group resource

use crate::resources::organizational::{Organizational, OrganizationalKind};

#[derive(Debug)]
pub struct ClusterGroupKind;

impl OrganizationalKind for ClusterGroupKind {
    const TYPE_NAME: &'static str = "cluster_group";
    const ENDPOINT: &'static str = "virtualization/cluster-groups";
    const DESCRIPTION: &'static str = "Manages a cluster group in NetBox.";
}

pub type ClusterGroupResource = Organizational<ClusterGroupKind>;
