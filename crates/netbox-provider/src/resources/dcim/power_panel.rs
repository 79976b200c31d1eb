//! Power panel resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Schema};
use crate::value::Value;
use netbox_client::{NetBoxApi, PowerPanel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerPanelModel {
    pub id: Value<String>,
    pub site: Value<String>,
    pub location: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct PowerPanelResource;

#[async_trait::async_trait]
impl ResourceDef for PowerPanelResource {
    type Model = PowerPanelModel;
    type Response = PowerPanel;

    const TYPE_NAME: &'static str = "power_panel";
    const ENDPOINT: &'static str = "dcim/power-panels";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::required_reference("site", "Site (ID, name or slug)."),
            schema::reference("location", "Location (ID, name or slug)."),
            schema::name(),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a power panel in NetBox.", attributes)
    }

    fn id(&self, model: &PowerPanelModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut PowerPanelModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &PowerPanelModel,
        _prior: Option<&PowerPanelModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.text("name", &plan.name)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.required_reference(api, &lookup::SITE, "site", &plan.site).await?;
        body.reference(api, &lookup::LOCATION, "location", &plan.location).await?;
        Ok(body)
    }

    fn apply_response(&self, panel: &PowerPanel, model: &mut PowerPanelModel) {
        model.id = Value::known(panel.id.to_string());
        model.site = reference::read_back(&model.site, panel.site.as_ref());
        model.location = reference::read_back(&model.location, panel.location.as_ref());
        model.name = Value::known(panel.name.clone());
        model.description = string_from_api(&model.description, &panel.description);
        model.comments = string_from_api(&model.comments, &panel.comments);
    }

    fn metadata<'a>(&self, model: &'a mut PowerPanelModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_panel_in_location() {
        let mock = mock();
        let site = mock.insert("dcim/sites", json!({"name": "Head Office", "slug": "hq"}));
        mock.insert("dcim/locations", json!({"name": "Plant Room", "slug": "plant", "site": site}));
        let exec = executor(&mock, PowerPanelResource);

        let created = exec
            .create(PowerPanelModel {
                site: known(&site.to_string()),
                location: known("plant"),
                name: known("PP-1"),
                ..PowerPanelModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.site, known(&site.to_string()));
        assert_eq!(created.location, known("plant"));
        assert_eq!(created.comments, Value::Null);

        let read = exec.read(created.clone()).await.unwrap().unwrap();
        assert_eq!(read, created);

        let mut moved = created.clone();
        moved.location = Value::Null;
        let updated = exec.update(moved, created).await.unwrap();
        assert_eq!(updated.location, Value::Null);
    }

    #[tokio::test]
    async fn test_site_is_required() {
        let exec = executor(&mock(), PowerPanelResource);
        let err = exec
            .create(PowerPanelModel {
                name: known("PP-1"),
                ..PowerPanelModel::default()
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("site"), "{err}");
    }
}
