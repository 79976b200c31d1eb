//! Device primary IP resource
//!
//! Owns the `primary_ip4`, `primary_ip6` and `oob_ip` fields of an existing
//! device rather than an object of its own. The state ID is the device ID;
//! create and update PATCH the device, delete clears the three fields.
//! Pointing an existing assignment at another device clears the old one
//! first, since NetBox lets an address be primary for one device only.

use crate::crud::{ResourceDef, UpdateMode};
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, RequestBody};
use crate::reference;
use crate::schema::{self, Schema};
use crate::value::Value;
use netbox_client::{Device, NestedObject, NetBoxApi, NetBoxError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as Json};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicePrimaryIpModel {
    pub id: Value<String>,
    pub device: Value<String>,
    pub primary_ip4: Value<String>,
    pub primary_ip6: Value<String>,
    pub oob_ip: Value<String>,
}

#[derive(Debug, Default)]
pub struct DevicePrimaryIpResource;

/// Take the parent ID out of a create body, leaving the fields to PATCH
pub(crate) fn split_parent(body: &Json, key: &str) -> Result<(i32, Json), NetBoxError> {
    let mut fields = body.clone();
    let parent = fields
        .as_object_mut()
        .and_then(|o| o.remove(key))
        .and_then(|id| id.as_i64())
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| NetBoxError::InvalidRequest(format!("request has no {} ID", key)))?;
    Ok((parent, fields))
}

/// PATCH the parent named in `body`, clearing `id` first when it differs
pub(crate) async fn move_to_parent(
    api: &dyn NetBoxApi,
    endpoint: &str,
    id: i32,
    body: &Json,
    key: &str,
    cleared: &Json,
) -> Result<Json, NetBoxError> {
    let (parent, fields) = split_parent(body, key)?;
    if parent != id {
        match api.partial_update(endpoint, id, cleared).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }
    }
    api.partial_update(endpoint, parent, &fields).await
}

fn cleared() -> Json {
    json!({"primary_ip4": null, "primary_ip6": null, "oob_ip": null})
}

/// Brief of the parent object itself, for reference read-back
pub(crate) fn parent_brief(id: i32, name: Option<&str>) -> NestedObject {
    NestedObject {
        id,
        name: name.map(str::to_string),
        ..NestedObject::default()
    }
}

#[async_trait::async_trait]
impl ResourceDef for DevicePrimaryIpResource {
    type Model = DevicePrimaryIpModel;
    type Response = Device;

    const TYPE_NAME: &'static str = "device_primary_ip";
    const ENDPOINT: &'static str = "dcim/devices";
    const UPDATE_MODE: UpdateMode = UpdateMode::Partial;

    fn schema(&self) -> Schema {
        Schema::new(
            "Assigns the primary and out-of-band IP addresses of an existing device in NetBox.",
            vec![
                schema::id(),
                schema::required_reference("device", "Device (ID or name)."),
                schema::reference("primary_ip4", "Primary IPv4 address (ID or address with mask)."),
                schema::reference("primary_ip6", "Primary IPv6 address (ID or address with mask)."),
                schema::reference("oob_ip", "Out-of-band management address (ID or address with mask)."),
            ],
        )
    }

    fn id(&self, model: &DevicePrimaryIpModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut DevicePrimaryIpModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &DevicePrimaryIpModel,
        _prior: Option<&DevicePrimaryIpModel>,
    ) -> Result<RequestBody, ProviderError> {
        if plan.primary_ip4.is_null() && plan.primary_ip6.is_null() && plan.oob_ip.is_null() {
            return Err(ProviderError::validation(
                "primary_ip4",
                "at least one of primary_ip4, primary_ip6 or oob_ip must be set",
            ));
        }

        let mut body = RequestBody::new();
        body.reference(api, &lookup::IP_ADDRESS, "primary_ip4", &plan.primary_ip4)
            .await?;
        body.reference(api, &lookup::IP_ADDRESS, "primary_ip6", &plan.primary_ip6)
            .await?;
        body.reference(api, &lookup::IP_ADDRESS, "oob_ip", &plan.oob_ip).await?;
        body.required_reference(api, &lookup::DEVICE, "device", &plan.device)
            .await?;
        Ok(body)
    }

    fn apply_response(&self, device: &Device, model: &mut DevicePrimaryIpModel) {
        model.id = Value::known(device.id.to_string());
        let brief = parent_brief(device.id, device.name.as_deref());
        model.device = reference::read_back(&model.device, Some(&brief));
        model.primary_ip4 = reference::read_back(&model.primary_ip4, device.primary_ip4.as_ref());
        model.primary_ip6 = reference::read_back(&model.primary_ip6, device.primary_ip6.as_ref());
        model.oob_ip = reference::read_back(&model.oob_ip, device.oob_ip.as_ref());
    }

    async fn submit_create(
        &self,
        api: &dyn NetBoxApi,
        _plan: &DevicePrimaryIpModel,
        body: &Json,
    ) -> Result<Json, NetBoxError> {
        let (device, fields) = split_parent(body, "device")?;
        api.partial_update(Self::ENDPOINT, device, &fields).await
    }

    async fn submit_update(
        &self,
        api: &dyn NetBoxApi,
        id: i32,
        _plan: &DevicePrimaryIpModel,
        body: &Json,
    ) -> Result<Json, NetBoxError> {
        move_to_parent(api, Self::ENDPOINT, id, body, "device", &cleared()).await
    }

    async fn submit_delete(&self, api: &dyn NetBoxApi, id: i32) -> Result<(), NetBoxError> {
        api.partial_update(Self::ENDPOINT, id, &cleared()).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};

    #[tokio::test]
    async fn test_assign_update_and_clear() {
        let mock = mock();
        let device = mock.insert("dcim/devices", json!({"name": "web-01"}));
        let v4 = mock.insert("ipam/ip-addresses", json!({"address": "10.0.0.5/24"}));
        let v6 = mock.insert("ipam/ip-addresses", json!({"address": "2001:db8::5/64"}));
        let exec = executor(&mock, DevicePrimaryIpResource);

        let created = exec
            .create(DevicePrimaryIpModel {
                device: known("web-01"),
                primary_ip4: known("10.0.0.5/24"),
                ..DevicePrimaryIpModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, known(&device.to_string()));
        assert_eq!(created.device, known("web-01"));
        assert_eq!(created.primary_ip4, known("10.0.0.5/24"));
        assert_eq!(created.primary_ip6, Value::Null);
        assert_eq!(mock.count("dcim/devices"), 1);
        let request = mock.requests().pop().unwrap();
        assert_eq!(request.method, "PATCH");
        assert_eq!(request.body.unwrap().get("device"), None);

        let mut plan = created.clone();
        plan.primary_ip6 = known(&v6.to_string());
        let updated = exec.update(plan, created).await.unwrap();
        assert_eq!(updated.primary_ip6, known(&v6.to_string()));
        assert_eq!(mock.requests().pop().unwrap().method, "PATCH");
        assert_eq!(mock.get("dcim/devices", device).unwrap()["primary_ip4"]["id"], json!(v4));

        exec.delete(updated).await.unwrap();
        let record = mock.get("dcim/devices", device).unwrap();
        assert_eq!(record["name"], "web-01");
        assert!(record["primary_ip4"].is_null());
        assert!(record["primary_ip6"].is_null());
        assert!(record["oob_ip"].is_null());
    }

    #[tokio::test]
    async fn test_changing_device_moves_the_assignment() {
        let mock = mock();
        let web1 = mock.insert("dcim/devices", json!({"name": "web-01"}));
        let web2 = mock.insert("dcim/devices", json!({"name": "web-02"}));
        let v4 = mock.insert("ipam/ip-addresses", json!({"address": "10.0.0.5/24"}));
        let exec = executor(&mock, DevicePrimaryIpResource);

        let created = exec
            .create(DevicePrimaryIpModel {
                device: known("web-01"),
                primary_ip4: known("10.0.0.5/24"),
                ..DevicePrimaryIpModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, known(&web1.to_string()));

        let mut plan = created.clone();
        plan.device = known("web-02");
        let moved = exec.update(plan, created).await.unwrap();
        assert_eq!(moved.device, known("web-02"));
        assert_eq!(moved.id, known(&web2.to_string()));
        assert_eq!(moved.primary_ip4, known("10.0.0.5/24"));

        assert!(mock.get("dcim/devices", web1).unwrap()["primary_ip4"].is_null());
        assert_eq!(mock.get("dcim/devices", web2).unwrap()["primary_ip4"]["id"], json!(v4));

        let read = exec.read(moved.clone()).await.unwrap().unwrap();
        assert_eq!(read, moved);
    }

    #[tokio::test]
    async fn test_requires_an_address() {
        let mock = mock();
        let exec = executor(&mock, DevicePrimaryIpResource);
        let err = exec
            .create(DevicePrimaryIpModel {
                device: known("web-01"),
                ..DevicePrimaryIpModel::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation { .. }));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_of_missing_device_succeeds() {
        let mock = mock();
        let exec = executor(&mock, DevicePrimaryIpResource);
        let state = exec.import_state("4242").unwrap();
        exec.delete(state).await.unwrap();
    }
}
