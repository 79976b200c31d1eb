//! Cluster type resource

use crate::resources::organizational::{Organizational, OrganizationalKind};

#[derive(Debug)]
pub struct ClusterTypeKind;

impl OrganizationalKind for ClusterTypeKind {
    const TYPE_NAME: &'static str = "cluster_type";
    const ENDPOINT: &'static str = "virtualization/cluster-types";
    const DESCRIPTION: &'static str = "Manages a cluster type (e.g. VMware vSphere, Proxmox) in NetBox.";
}

pub type ClusterTypeResource = Organizational<ClusterTypeKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::organizational::OrganizationalModel;
    use crate::test_utils::{executor, known, mock};

    #[tokio::test]
    async fn test_cluster_type_lifecycle() {
        let mock = mock();
        let exec = executor(&mock, ClusterTypeResource::default());

        let created = exec
            .create(OrganizationalModel {
                name: known("VMware vSphere"),
                slug: known("vmware"),
                description: known("ESXi clusters"),
                ..OrganizationalModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.description, known("ESXi clusters"));

        exec.delete(created.clone()).await.unwrap();
        assert!(exec.read(created).await.unwrap().is_none());
        assert_eq!(mock.count("virtualization/cluster-types"), 0);
    }
}
