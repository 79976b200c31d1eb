//! Virtual machine primary IP resource
//!
//! Same shape as the device variant: the state ID is the virtual machine ID
//! and only `primary_ip4`/`primary_ip6` are owned. Changing the virtual
//! machine clears the addresses from the old one.

use crate::crud::{ResourceDef, UpdateMode};
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, RequestBody};
use crate::reference;
use crate::resources::dcim::device_primary_ip::{move_to_parent, parent_brief, split_parent};
use crate::schema::{self, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, NetBoxError, VirtualMachine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as Json};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualMachinePrimaryIpModel {
    pub id: Value<String>,
    pub virtual_machine: Value<String>,
    pub primary_ip4: Value<String>,
    pub primary_ip6: Value<String>,
}

#[derive(Debug, Default)]
pub struct VirtualMachinePrimaryIpResource;

#[async_trait::async_trait]
impl ResourceDef for VirtualMachinePrimaryIpResource {
    type Model = VirtualMachinePrimaryIpModel;
    type Response = VirtualMachine;

    const TYPE_NAME: &'static str = "virtual_machine_primary_ip";
    const ENDPOINT: &'static str = "virtualization/virtual-machines";
    const UPDATE_MODE: UpdateMode = UpdateMode::Partial;

    fn schema(&self) -> Schema {
        Schema::new(
            "Assigns the primary IP addresses of an existing virtual machine in NetBox.",
            vec![
                schema::id(),
                schema::required_reference("virtual_machine", "Virtual machine (ID or name)."),
                schema::reference("primary_ip4", "Primary IPv4 address (ID or address with mask)."),
                schema::reference("primary_ip6", "Primary IPv6 address (ID or address with mask)."),
            ],
        )
    }

    fn id(&self, model: &VirtualMachinePrimaryIpModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut VirtualMachinePrimaryIpModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &VirtualMachinePrimaryIpModel,
        _prior: Option<&VirtualMachinePrimaryIpModel>,
    ) -> Result<RequestBody, ProviderError> {
        if plan.primary_ip4.is_null() && plan.primary_ip6.is_null() {
            return Err(ProviderError::validation(
                "primary_ip4",
                "at least one of primary_ip4 or primary_ip6 must be set",
            ));
        }

        let mut body = RequestBody::new();
        body.reference(api, &lookup::IP_ADDRESS, "primary_ip4", &plan.primary_ip4)
            .await?;
        body.reference(api, &lookup::IP_ADDRESS, "primary_ip6", &plan.primary_ip6)
            .await?;
        body.required_reference(api, &lookup::VIRTUAL_MACHINE, "virtual_machine", &plan.virtual_machine)
            .await?;
        Ok(body)
    }

    fn apply_response(&self, vm: &VirtualMachine, model: &mut VirtualMachinePrimaryIpModel) {
        model.id = Value::known(vm.id.to_string());
        let brief = parent_brief(vm.id, Some(&vm.name));
        model.virtual_machine = reference::read_back(&model.virtual_machine, Some(&brief));
        model.primary_ip4 = reference::read_back(&model.primary_ip4, vm.primary_ip4.as_ref());
        model.primary_ip6 = reference::read_back(&model.primary_ip6, vm.primary_ip6.as_ref());
    }

    async fn submit_create(
        &self,
        api: &dyn NetBoxApi,
        _plan: &VirtualMachinePrimaryIpModel,
        body: &Json,
    ) -> Result<Json, NetBoxError> {
        let (vm, fields) = split_parent(body, "virtual_machine")?;
        api.partial_update(Self::ENDPOINT, vm, &fields).await
    }

    async fn submit_update(
        &self,
        api: &dyn NetBoxApi,
        id: i32,
        _plan: &VirtualMachinePrimaryIpModel,
        body: &Json,
    ) -> Result<Json, NetBoxError> {
        move_to_parent(api, Self::ENDPOINT, id, body, "virtual_machine", &cleared()).await
    }

    async fn submit_delete(&self, api: &dyn NetBoxApi, id: i32) -> Result<(), NetBoxError> {
        api.partial_update(Self::ENDPOINT, id, &cleared()).await.map(|_| ())
    }
}

fn cleared() -> Json {
    json!({"primary_ip4": null, "primary_ip6": null})
}
