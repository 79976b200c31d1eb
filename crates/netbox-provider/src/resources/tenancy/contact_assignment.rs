//! Contact assignment resource
//!
//! Attaches a contact to any NetBox object. The target object cannot be
//! changed in place; moving an assignment replaces it.

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{ContactAssignment, NetBoxApi};
use serde::{Deserialize, Serialize};

const PRIORITIES: &[&str] = &["primary", "secondary", "tertiary", "inactive"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactAssignmentModel {
    pub id: Value<String>,
    pub object_type: Value<String>,
    pub object_id: Value<i64>,
    pub contact: Value<String>,
    pub role: Value<String>,
    pub priority: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct ContactAssignmentResource;

#[async_trait::async_trait]
impl ResourceDef for ContactAssignmentResource {
    type Model = ContactAssignmentModel;
    type Response = ContactAssignment;

    const TYPE_NAME: &'static str = "contact_assignment";
    const ENDPOINT: &'static str = "tenancy/contact-assignments";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::required(
                "object_type",
                AttributeKind::String,
                "Content type of the assigned object, e.g. dcim.site.",
            )
            .requires_replace(),
            Attribute::required("object_id", AttributeKind::Int64, "ID of the assigned object.").requires_replace(),
            schema::required_reference("contact", "Contact (ID or name)."),
            schema::reference("role", "Contact role (ID, name or slug)."),
            Attribute::optional("priority", AttributeKind::String, "Priority of the contact for this object.")
                .one_of(PRIORITIES),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Assigns a contact to a NetBox object.", attributes)
    }

    fn id(&self, model: &ContactAssignmentModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut ContactAssignmentModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &ContactAssignmentModel,
        _prior: Option<&ContactAssignmentModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.int32("object_id", &plan.object_id)?;
        body.text("object_type", &plan.object_type);
        body.nullable("priority", &plan.priority)?;
        body.required_reference(api, &lookup::CONTACT, "contact", &plan.contact).await?;
        body.reference(api, &lookup::CONTACT_ROLE, "role", &plan.role).await?;
        Ok(body)
    }

    fn apply_response(&self, assignment: &ContactAssignment, model: &mut ContactAssignmentModel) {
        model.id = Value::known(assignment.id.to_string());
        model.object_type = Value::known(assignment.object_type.clone());
        model.object_id = Value::Known(assignment.object_id);
        model.contact = reference::read_back(&model.contact, assignment.contact.as_ref());
        model.role = reference::read_back(&model.role, assignment.role.as_ref());
        model.priority = choice_from_api(assignment.priority.as_ref());
    }

    fn metadata<'a>(&self, model: &'a mut ContactAssignmentModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}
