//! Contact resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{Contact, NetBoxApi};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub group: Value<String>,
    pub title: Value<String>,
    pub phone: Value<String>,
    pub email: Value<String>,
    pub address: Value<String>,
    pub link: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct ContactResource;

#[async_trait::async_trait]
impl ResourceDef for ContactResource {
    type Model = ContactModel;
    type Response = Contact;

    const TYPE_NAME: &'static str = "contact";
    const ENDPOINT: &'static str = "tenancy/contacts";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::name(),
            schema::reference("group", "Contact group (ID, name or slug)."),
            Attribute::optional("title", AttributeKind::String, "Job title."),
            Attribute::optional("phone", AttributeKind::String, "Phone number."),
            Attribute::optional("email", AttributeKind::String, "Email address."),
            Attribute::optional("address", AttributeKind::String, "Postal address."),
            Attribute::optional("link", AttributeKind::String, "URL with more information."),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a contact in NetBox.", attributes)
    }

    fn id(&self, model: &ContactModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut ContactModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &ContactModel,
        _prior: Option<&ContactModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("title", &plan.title)
            .text("phone", &plan.phone)
            .text("email", &plan.email)
            .text("address", &plan.address)
            .text("link", &plan.link)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.reference(api, &lookup::CONTACT_GROUP, "group", &plan.group).await?;
        Ok(body)
    }

    fn apply_response(&self, contact: &Contact, model: &mut ContactModel) {
        model.id = Value::known(contact.id.to_string());
        model.name = Value::known(contact.name.clone());
        model.group = reference::read_back(&model.group, contact.group.as_ref());
        model.title = string_from_api(&model.title, &contact.title);
        model.phone = string_from_api(&model.phone, &contact.phone);
        model.email = string_from_api(&model.email, &contact.email);
        model.address = string_from_api(&model.address, &contact.address);
        model.link = string_from_api(&model.link, &contact.link);
        model.description = string_from_api(&model.description, &contact.description);
        model.comments = string_from_api(&model.comments, &contact.comments);
    }

    fn metadata<'a>(&self, model: &'a mut ContactModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}
