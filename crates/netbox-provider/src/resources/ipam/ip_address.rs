//! IP address resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, optional_string_from_api, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{IpAddress, NetBoxApi};
use serde::{Deserialize, Serialize};

const IP_STATUSES: &[&str] = &["active", "reserved", "deprecated", "dhcp", "slaac"];
const IP_ROLES: &[&str] = &["loopback", "secondary", "anycast", "vip", "vrrp", "hsrp", "glbp", "carp"];
const ASSIGNABLE: &[&str] = &["dcim.interface", "virtualization.vminterface", "ipam.fhrpgroup"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddressModel {
    pub id: Value<String>,
    pub address: Value<String>,
    pub vrf: Value<String>,
    pub tenant: Value<String>,
    pub status: Value<String>,
    pub role: Value<String>,
    pub assigned_object_type: Value<String>,
    pub assigned_object_id: Value<i64>,
    pub dns_name: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct IpAddressResource;

#[async_trait::async_trait]
impl ResourceDef for IpAddressResource {
    type Model = IpAddressModel;
    type Response = IpAddress;

    const TYPE_NAME: &'static str = "ip_address";
    const ENDPOINT: &'static str = "ipam/ip-addresses";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::required("address", AttributeKind::String, "IPv4 or IPv6 address with mask, e.g. 10.0.0.1/24."),
            schema::reference("vrf", "VRF (ID or name)."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            schema::status(IP_STATUSES),
            Attribute::optional("role", AttributeKind::String, "Functional role of the address.").one_of(IP_ROLES),
            Attribute::optional("assigned_object_type", AttributeKind::String, "Type of the assigned interface.")
                .one_of(ASSIGNABLE),
            Attribute::optional("assigned_object_id", AttributeKind::Int64, "ID of the assigned interface."),
            Attribute::optional("dns_name", AttributeKind::String, "Hostname or FQDN."),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages an IP address in NetBox.", attributes)
    }

    fn id(&self, model: &IpAddressModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut IpAddressModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &IpAddressModel,
        _prior: Option<&IpAddressModel>,
    ) -> Result<RequestBody, ProviderError> {
        if plan.assigned_object_type.is_null() != plan.assigned_object_id.is_null() {
            return Err(ProviderError::validation(
                "assigned_object_id",
                "assigned_object_type and assigned_object_id must be set together",
            ));
        }

        let mut body = RequestBody::new();
        body.int32("assigned_object_id", &plan.assigned_object_id)?;
        body.text("address", &plan.address)
            .text("role", &plan.role)
            .text("dns_name", &plan.dns_name)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.optional("status", &plan.status)?
            .nullable("assigned_object_type", &plan.assigned_object_type)?;
        body.reference(api, &lookup::VRF, "vrf", &plan.vrf).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        Ok(body)
    }

    fn apply_response(&self, ip: &IpAddress, model: &mut IpAddressModel) {
        model.id = Value::known(ip.id.to_string());
        model.address = Value::known(ip.address.clone());
        model.vrf = reference::read_back(&model.vrf, ip.vrf.as_ref());
        model.tenant = reference::read_back(&model.tenant, ip.tenant.as_ref());
        model.status = choice_from_api(ip.status.as_ref());
        model.role = choice_from_api(ip.role.as_ref());
        model.assigned_object_type = optional_string_from_api(&model.assigned_object_type, ip.assigned_object_type.as_deref());
        model.assigned_object_id = ip.assigned_object_id.into();
        model.dns_name = string_from_api(&model.dns_name, &ip.dns_name);
        model.description = string_from_api(&model.description, &ip.description);
        model.comments = string_from_api(&model.comments, &ip.comments);
    }

    fn metadata<'a>(&self, model: &'a mut IpAddressModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_vrf_by_name_and_status_default() {
        let mock = mock();
        mock.insert("ipam/vrfs", json!({"name": "prod", "rd": "65000:1"}));
        let exec = executor(&mock, IpAddressResource);

        let created = exec
            .create(IpAddressModel {
                address: known("10.0.0.1/24"),
                vrf: known("prod"),
                dns_name: known("gw.example.com"),
                ..IpAddressModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.vrf, known("prod"));
        assert_eq!(created.status, known("active"));
        assert_eq!(created.role, Value::Null);
        assert_eq!(created.dns_name, known("gw.example.com"));
    }
}
