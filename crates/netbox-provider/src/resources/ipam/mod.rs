//! IPAM resources

pub mod aggregate;
pub mod asn;
pub mod fhrp_group;
pub mod fhrp_group_assignment;
pub mod ip_address;
pub mod ip_range;
pub mod prefix;
pub mod rir;
pub mod role;
pub mod route_target;
pub mod vlan;
pub mod vlan_group;
pub mod vrf;

use crate::crud::{managed, ManagedResource};
use netbox_client::NetBoxApi;
use std::sync::Arc;

pub(crate) fn register(api: &Arc<dyn NetBoxApi>, resources: &mut Vec<Arc<dyn ManagedResource>>) {
    resources.push(managed(api, rir::RirResource));
    resources.push(managed(api, aggregate::AggregateResource));
    resources.push(managed(api, role::RoleResource));
    resources.push(managed(api, prefix::PrefixResource));
    resources.push(managed(api, ip_address::IpAddressResource));
    resources.push(managed(api, ip_range::IpRangeResource));
    resources.push(managed(api, vlan_group::VlanGroupResource));
    resources.push(managed(api, vlan::VlanResource));
    resources.push(managed(api, vrf::VrfResource));
    resources.push(managed(api, route_target::RouteTargetResource));
    resources.push(managed(api, asn::AsnResource));
    resources.push(managed(api, fhrp_group::FhrpGroupResource));
    resources.push(managed(api, fhrp_group_assignment::FhrpGroupAssignmentResource));
}
