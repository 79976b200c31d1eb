//! Virtualization resources

pub mod cluster;
pub mod cluster_group;
pub mod cluster_type;
pub mod virtual_disk;
pub mod virtual_machine;
pub mod virtual_machine_primary_ip;
pub mod vm_interface;

use crate::crud::{managed, ManagedResource};
use netbox_client::NetBoxApi;
use std::sync::Arc;

pub(crate) fn register(api: &Arc<dyn NetBoxApi>, resources: &mut Vec<Arc<dyn ManagedResource>>) {
    resources.push(managed(api, cluster_type::ClusterTypeResource::default()));
    resources.push(managed(api, cluster_group::ClusterGroupResource::default()));
    resources.push(managed(api, cluster::ClusterResource));
    resources.push(managed(api, virtual_machine::VirtualMachineResource));
    resources.push(managed(api, virtual_machine_primary_ip::VirtualMachinePrimaryIpResource));
    resources.push(managed(api, vm_interface::VmInterfaceResource));
    resources.push(managed(api, virtual_disk::VirtualDiskResource));
}
