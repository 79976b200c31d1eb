//! Power feed resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{NetBoxApi, PowerFeed};
use serde::{Deserialize, Serialize};

const FEED_STATUSES: &[&str] = &["offline", "active", "planned", "failed"];
const FEED_TYPES: &[&str] = &["primary", "redundant"];
const SUPPLIES: &[&str] = &["ac", "dc"];
const PHASES: &[&str] = &["single-phase", "three-phase"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerFeedModel {
    pub id: Value<String>,
    pub power_panel: Value<String>,
    pub rack: Value<String>,
    pub name: Value<String>,
    pub status: Value<String>,
    #[serde(rename = "type")]
    pub feed_type: Value<String>,
    pub supply: Value<String>,
    pub phase: Value<String>,
    pub voltage: Value<i64>,
    pub amperage: Value<i64>,
    pub max_utilization: Value<i64>,
    pub mark_connected: Value<bool>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct PowerFeedResource;

#[async_trait::async_trait]
impl ResourceDef for PowerFeedResource {
    type Model = PowerFeedModel;
    type Response = PowerFeed;

    const TYPE_NAME: &'static str = "power_feed";
    const ENDPOINT: &'static str = "dcim/power-feeds";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::required_reference("power_panel", "Power panel (ID or name)."),
            schema::reference("rack", "Rack (ID or name)."),
            schema::name(),
            schema::status(FEED_STATUSES),
            Attribute::optional("type", AttributeKind::String, "Feed type.")
                .one_of(FEED_TYPES)
                .computed(),
            Attribute::optional("supply", AttributeKind::String, "Supply type.")
                .one_of(SUPPLIES)
                .computed(),
            Attribute::optional("phase", AttributeKind::String, "Phase.")
                .one_of(PHASES)
                .computed(),
            Attribute::optional("voltage", AttributeKind::Int64, "Voltage.").computed(),
            Attribute::optional("amperage", AttributeKind::Int64, "Amperage.")
                .validate_with(Validator::Range(1, i64::from(i32::MAX)))
                .computed(),
            Attribute::optional("max_utilization", AttributeKind::Int64, "Maximum permissible draw (percentage).")
                .validate_with(Validator::Range(1, 100))
                .computed(),
            Attribute::optional("mark_connected", AttributeKind::Bool, "Treat as if a cable is connected.")
                .computed(),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a power feed in NetBox.", attributes)
    }

    fn id(&self, model: &PowerFeedModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut PowerFeedModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &PowerFeedModel,
        _prior: Option<&PowerFeedModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.optional_int32("voltage", &plan.voltage)?
            .optional_int32("amperage", &plan.amperage)?
            .optional_int32("max_utilization", &plan.max_utilization)?;
        body.text("name", &plan.name)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.optional("status", &plan.status)?
            .optional("type", &plan.feed_type)?
            .optional("supply", &plan.supply)?
            .optional("phase", &plan.phase)?
            .optional("mark_connected", &plan.mark_connected)?;
        body.required_reference(api, &lookup::POWER_PANEL, "power_panel", &plan.power_panel)
            .await?;
        body.reference(api, &lookup::RACK, "rack", &plan.rack).await?;
        Ok(body)
    }

    fn apply_response(&self, feed: &PowerFeed, model: &mut PowerFeedModel) {
        model.id = Value::known(feed.id.to_string());
        model.power_panel = reference::read_back(&model.power_panel, feed.power_panel.as_ref());
        model.rack = reference::read_back(&model.rack, feed.rack.as_ref());
        model.name = Value::known(feed.name.clone());
        model.status = choice_from_api(feed.status.as_ref());
        model.feed_type = choice_from_api(feed.feed_type.as_ref());
        model.supply = choice_from_api(feed.supply.as_ref());
        model.phase = choice_from_api(feed.phase.as_ref());
        model.voltage = feed.voltage.into();
        model.amperage = feed.amperage.into();
        model.max_utilization = feed.max_utilization.into();
        model.mark_connected = feed.mark_connected.into();
        model.description = string_from_api(&model.description, &feed.description);
        model.comments = string_from_api(&model.comments, &feed.comments);
    }

    fn metadata<'a>(&self, model: &'a mut PowerFeedModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_electrical_defaults_are_read_back() {
        let mock = mock();
        let site = mock.insert("dcim/sites", json!({"name": "AMS1", "slug": "ams1"}));
        mock.insert("dcim/power-panels", json!({"name": "PP-A", "site": site}));
        let exec = executor(&mock, PowerFeedResource);

        let created = exec
            .create(PowerFeedModel {
                power_panel: known("PP-A"),
                name: known("Feed A1"),
                phase: known("three-phase"),
                voltage: Value::Known(230),
                ..PowerFeedModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.power_panel, known("PP-A"));
        assert_eq!(created.phase, known("three-phase"));
        assert_eq!(created.voltage, Value::Known(230));
        assert_eq!(created.amperage, Value::Known(20));
        assert_eq!(created.feed_type, known("primary"));
        assert_eq!(created.max_utilization, Value::Known(80));
        assert_eq!(created.mark_connected, Value::Known(false));
        assert_eq!(created.status, known("active"));
    }
}
