//! FHRP group assignment resource
//!
//! Binds an FHRP group to a device or virtual machine interface.

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, RequestBody};
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{FhrpGroupAssignment, NetBoxApi};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

const INTERFACE_TYPES: &[&str] = &["dcim.interface", "virtualization.vminterface"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FhrpGroupAssignmentModel {
    pub id: Value<String>,
    pub group_id: Value<String>,
    pub interface_type: Value<String>,
    pub interface_id: Value<i64>,
    pub priority: Value<i64>,
}

#[derive(Debug, Default)]
pub struct FhrpGroupAssignmentResource;

#[async_trait::async_trait]
impl ResourceDef for FhrpGroupAssignmentResource {
    type Model = FhrpGroupAssignmentModel;
    type Response = FhrpGroupAssignment;

    const TYPE_NAME: &'static str = "fhrp_group_assignment";
    const ENDPOINT: &'static str = "ipam/fhrp-group-assignments";

    fn schema(&self) -> Schema {
        Schema::new(
            "Assigns an FHRP group to an interface in NetBox.",
            vec![
                schema::id(),
                schema::required_reference("group_id", "FHRP group (ID or name)."),
                Attribute::required("interface_type", AttributeKind::String, "Content type of the interface.")
                    .one_of(INTERFACE_TYPES),
                Attribute::required("interface_id", AttributeKind::Int64, "ID of the interface."),
                Attribute::required("priority", AttributeKind::Int64, "Priority of this interface in the group.")
                    .validate_with(Validator::Range(0, 255)),
            ],
        )
    }

    fn id(&self, model: &FhrpGroupAssignmentModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut FhrpGroupAssignmentModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &FhrpGroupAssignmentModel,
        _prior: Option<&FhrpGroupAssignmentModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.int32("interface_id", &plan.interface_id)?
            .int32("priority", &plan.priority)?;
        body.text("interface_type", &plan.interface_type);
        let group = lookup::resolve_required(api, &lookup::FHRP_GROUP, "group_id", &plan.group_id).await?;
        body.set("group", Json::from(group));
        Ok(body)
    }

    fn apply_response(&self, assignment: &FhrpGroupAssignment, model: &mut FhrpGroupAssignmentModel) {
        model.id = Value::known(assignment.id.to_string());
        // Groups are often unnamed, so an unset reference reads back as the ID
        model.group_id = match (&model.group_id, assignment.group.as_ref()) {
            (Value::Known(_), group) => reference::read_back(&model.group_id, group),
            (_, Some(group)) => Value::known(group.id.to_string()),
            (_, None) => Value::Null,
        };
        model.interface_type = Value::known(assignment.interface_type.clone());
        model.interface_id = Value::Known(assignment.interface_id);
        model.priority = Value::Known(assignment.priority);
    }
}
