//! VLAN resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{NetBoxApi, Vlan};
use serde::{Deserialize, Serialize};

const VLAN_STATUSES: &[&str] = &["active", "reserved", "deprecated"];
const MIN_VID: i64 = 1;
const MAX_VID: i64 = 4094;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VlanModel {
    pub id: Value<String>,
    pub vid: Value<i64>,
    pub name: Value<String>,
    pub group: Value<String>,
    pub site: Value<String>,
    pub tenant: Value<String>,
    pub status: Value<String>,
    pub role: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct VlanResource;

#[async_trait::async_trait]
impl ResourceDef for VlanResource {
    type Model = VlanModel;
    type Response = Vlan;

    const TYPE_NAME: &'static str = "vlan";
    const ENDPOINT: &'static str = "ipam/vlans";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::required("vid", AttributeKind::Int64, "Numeric VLAN ID (1-4094).")
                .validate_with(Validator::Range(MIN_VID, MAX_VID)),
            schema::name(),
            schema::reference("group", "VLAN group (ID, name or slug)."),
            schema::reference("site", "Site (ID, name or slug)."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            schema::status(VLAN_STATUSES),
            schema::reference("role", "IPAM role (ID, name or slug)."),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a VLAN in NetBox.", attributes)
    }

    fn id(&self, model: &VlanModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut VlanModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &VlanModel,
        _prior: Option<&VlanModel>,
    ) -> Result<RequestBody, ProviderError> {
        if let Some(vid) = plan.vid.as_known().filter(|v| !(MIN_VID..=MAX_VID).contains(*v)) {
            return Err(ProviderError::validation(
                "vid",
                format!("{} is outside {}..={}", vid, MIN_VID, MAX_VID),
            ));
        }

        let mut body = RequestBody::new();
        body.int32("vid", &plan.vid)?
            .optional("status", &plan.status)?;
        body.text("name", &plan.name)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.reference(api, &lookup::VLAN_GROUP, "group", &plan.group).await?;
        body.reference(api, &lookup::SITE, "site", &plan.site).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        body.reference(api, &lookup::IPAM_ROLE, "role", &plan.role).await?;
        Ok(body)
    }

    fn apply_response(&self, vlan: &Vlan, model: &mut VlanModel) {
        model.id = Value::known(vlan.id.to_string());
        model.vid = Value::Known(vlan.vid);
        model.name = Value::known(vlan.name.clone());
        model.group = reference::read_back(&model.group, vlan.group.as_ref());
        model.site = reference::read_back(&model.site, vlan.site.as_ref());
        model.tenant = reference::read_back(&model.tenant, vlan.tenant.as_ref());
        model.status = choice_from_api(vlan.status.as_ref());
        model.role = reference::read_back(&model.role, vlan.role.as_ref());
        model.description = string_from_api(&model.description, &vlan.description);
        model.comments = string_from_api(&model.comments, &vlan.comments);
    }

    fn metadata<'a>(&self, model: &'a mut VlanModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_out_of_range_vid_is_rejected() {
        let mock = mock();
        let exec = executor(&mock, VlanResource);
        for vid in [0, 4095] {
            let err = exec
                .create(VlanModel {
                    vid: Value::Known(vid),
                    name: known("bad"),
                    ..VlanModel::default()
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ProviderError::Validation { ref attribute, .. } if attribute == "vid"));
        }
        assert_eq!(mock.request_count(), 0);
        assert!(VlanResource.schema().validate(&json!({"vid": 4095, "name": "x"})).is_err());
    }

    #[tokio::test]
    async fn test_group_reference_by_slug() {
        let mock = mock();
        mock.insert("ipam/vlan-groups", json!({"name": "Fabric A", "slug": "fabric-a"}));
        let exec = executor(&mock, VlanResource);
        let created = exec
            .create(VlanModel {
                vid: Value::Known(100),
                name: known("servers"),
                group: known("fabric-a"),
                ..VlanModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.vid, Value::Known(100));
        assert_eq!(created.group, known("fabric-a"));
        assert_eq!(created.status, known("active"));
    }
}
