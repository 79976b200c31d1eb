//! Webhook resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::mapping::{choice_from_api, model_id, optional_string_from_api, preserve_write_only, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, Webhook};
use serde::{Deserialize, Serialize};
use serde_json::json;

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub payload_url: Value<String>,
    pub http_method: Value<String>,
    pub http_content_type: Value<String>,
    pub additional_headers: Value<String>,
    pub body_template: Value<String>,
    pub secret: Value<String>,
    pub ssl_verification: Value<bool>,
    pub ca_file_path: Value<String>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct WebhookResource;

#[async_trait::async_trait]
impl ResourceDef for WebhookResource {
    type Model = WebhookModel;
    type Response = Webhook;

    const TYPE_NAME: &'static str = "webhook";
    const ENDPOINT: &'static str = "extras/webhooks";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::name(),
            Attribute::required("payload_url", AttributeKind::String, "URL called when the webhook fires."),
            Attribute::optional("http_method", AttributeKind::String, "HTTP method.")
                .one_of(HTTP_METHODS)
                .default_value(json!("POST")),
            Attribute::optional("http_content_type", AttributeKind::String, "Content-Type header of the request.")
                .default_value(json!("application/json")),
            Attribute::optional(
                "additional_headers",
                AttributeKind::String,
                "Extra headers, one `Name: Value` per line.",
            ),
            Attribute::optional("body_template", AttributeKind::String, "Jinja2 template for the request body."),
            Attribute::optional("secret", AttributeKind::String, "HMAC secret for the payload signature. Never returned by NetBox.")
                .sensitive(),
            Attribute::optional("ssl_verification", AttributeKind::Bool, "Verify the receiver's TLS certificate.")
                .default_value(json!(true)),
            Attribute::optional("ca_file_path", AttributeKind::String, "CA bundle used for TLS verification."),
            schema::description(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a webhook in NetBox.", attributes)
    }

    fn id(&self, model: &WebhookModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut WebhookModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &WebhookModel,
        _prior: Option<&WebhookModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("payload_url", &plan.payload_url)
            .text("additional_headers", &plan.additional_headers)
            .text("body_template", &plan.body_template)
            .text("secret", &plan.secret)
            .text("description", &plan.description);
        body.optional("http_method", &plan.http_method)?
            .optional("http_content_type", &plan.http_content_type)?
            .optional("ssl_verification", &plan.ssl_verification)?
            .nullable("ca_file_path", &plan.ca_file_path)?;
        Ok(body)
    }

    fn apply_response(&self, webhook: &Webhook, model: &mut WebhookModel) {
        model.id = Value::known(webhook.id.to_string());
        model.name = Value::known(webhook.name.clone());
        model.payload_url = Value::known(webhook.payload_url.clone());
        model.http_method = choice_from_api(webhook.http_method.as_ref());
        model.http_content_type = string_from_api(&model.http_content_type, &webhook.http_content_type);
        model.additional_headers = string_from_api(&model.additional_headers, &webhook.additional_headers);
        model.body_template = string_from_api(&model.body_template, &webhook.body_template);
        model.secret = preserve_write_only(&model.secret);
        model.ssl_verification = webhook.ssl_verification.into();
        model.ca_file_path = optional_string_from_api(&model.ca_file_path, webhook.ca_file_path.as_deref());
        model.description = string_from_api(&model.description, &webhook.description);
    }

    fn metadata<'a>(&self, model: &'a mut WebhookModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}
