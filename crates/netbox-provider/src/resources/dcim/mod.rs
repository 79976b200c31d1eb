//! DCIM resources

pub mod cable;
pub mod device;
pub mod device_primary_ip;
pub mod device_role;
pub mod device_type;
pub mod interface;
pub mod location;
pub mod manufacturer;
pub mod platform;
pub mod power_feed;
pub mod power_panel;
pub mod rack;
pub mod rack_role;
pub mod region;
pub mod site;
pub mod site_group;

use crate::crud::{managed, ManagedResource};
use netbox_client::NetBoxApi;
use std::sync::Arc;

pub(crate) fn register(api: &Arc<dyn NetBoxApi>, resources: &mut Vec<Arc<dyn ManagedResource>>) {
    resources.push(managed(api, region::RegionResource::default()));
    resources.push(managed(api, site_group::SiteGroupResource::default()));
    resources.push(managed(api, site::SiteResource));
    resources.push(managed(api, location::LocationResource));
    resources.push(managed(api, rack_role::RackRoleResource));
    resources.push(managed(api, rack::RackResource));
    resources.push(managed(api, manufacturer::ManufacturerResource::default()));
    resources.push(managed(api, platform::PlatformResource));
    resources.push(managed(api, device_role::DeviceRoleResource));
    resources.push(managed(api, device_type::DeviceTypeResource));
    resources.push(managed(api, device::DeviceResource));
    resources.push(managed(api, device_primary_ip::DevicePrimaryIpResource));
    resources.push(managed(api, interface::InterfaceResource));
    resources.push(managed(api, cable::CableResource));
    resources.push(managed(api, power_panel::PowerPanelResource));
    resources.push(managed(api, power_feed::PowerFeedResource));
}
