//! Journal entry resource
//!
//! Unlike every other resource the ID is an integer attribute.

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::mapping::{choice_from_api, safe_i32, RequestBody};
use crate::metadata::Metadata;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{JournalEntry, NetBoxApi};
use serde::{Deserialize, Serialize};
use serde_json::json;

const KINDS: &[&str] = &["info", "success", "warning", "danger"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalEntryModel {
    pub id: Value<i64>,
    pub assigned_object_type: Value<String>,
    pub assigned_object_id: Value<i64>,
    pub kind: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct JournalEntryResource;

#[async_trait::async_trait]
impl ResourceDef for JournalEntryResource {
    type Model = JournalEntryModel;
    type Response = JournalEntry;

    const TYPE_NAME: &'static str = "journal_entry";
    const ENDPOINT: &'static str = "extras/journal-entries";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            Attribute::computed_only("id", AttributeKind::Int64, "The ID of the journal entry in NetBox."),
            Attribute::required(
                "assigned_object_type",
                AttributeKind::String,
                "Content type of the object the entry is attached to, e.g. dcim.device.",
            )
            .requires_replace(),
            Attribute::required("assigned_object_id", AttributeKind::Int64, "ID of the object the entry is attached to.")
                .requires_replace(),
            Attribute::optional("kind", AttributeKind::String, "Severity of the entry.")
                .one_of(KINDS)
                .default_value(json!("info")),
            Attribute::required("comments", AttributeKind::String, "Entry text (Markdown)."),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a journal entry attached to a NetBox object.", attributes)
    }

    fn id(&self, model: &JournalEntryModel) -> Result<i32, ProviderError> {
        match model.id {
            Value::Known(id) if id > 0 => safe_i32("id", id),
            Value::Known(id) => Err(ProviderError::InvalidId(id.to_string())),
            _ => Err(ProviderError::InvalidId("<unset>".to_string())),
        }
    }

    fn set_id(&self, model: &mut JournalEntryModel, id: i32) {
        model.id = Value::Known(i64::from(id));
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &JournalEntryModel,
        _prior: Option<&JournalEntryModel>,
    ) -> Result<RequestBody, ProviderError> {
        if plan.comments.as_str().is_none_or(|c| c.trim().is_empty()) {
            return Err(ProviderError::validation("comments", "journal entries need a non-empty comment"));
        }

        let mut body = RequestBody::new();
        body.int32("assigned_object_id", &plan.assigned_object_id)?;
        body.text("assigned_object_type", &plan.assigned_object_type)
            .text("comments", &plan.comments);
        body.optional("kind", &plan.kind)?;
        Ok(body)
    }

    fn apply_response(&self, entry: &JournalEntry, model: &mut JournalEntryModel) {
        model.id = Value::Known(i64::from(entry.id));
        model.assigned_object_type = Value::known(entry.assigned_object_type.clone());
        model.assigned_object_id = Value::Known(entry.assigned_object_id);
        model.kind = choice_from_api(entry.kind.as_ref());
        model.comments = Value::known(entry.comments.clone());
    }

    fn metadata<'a>(&self, model: &'a mut JournalEntryModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};

    #[tokio::test]
    async fn test_entry_lifecycle_with_integer_id() {
        let mock = mock();
        let device = mock.insert("dcim/devices", json!({"name": "web-01"}));
        let exec = executor(&mock, JournalEntryResource);

        let created = exec
            .create(JournalEntryModel {
                assigned_object_type: known("dcim.device"),
                assigned_object_id: Value::Known(i64::from(device)),
                kind: Value::Unknown,
                comments: known("Replaced PSU 2"),
                ..JournalEntryModel::default()
            })
            .await
            .unwrap();
        assert!(matches!(created.id, Value::Known(id) if id > 0));
        assert_eq!(created.kind, known("info"));

        let state = serde_json::to_value(&created).unwrap();
        assert!(state["id"].is_i64());

        let mut plan = created.clone();
        plan.kind = known("warning");
        let updated = exec.update(plan, created).await.unwrap();
        assert_eq!(updated.kind, known("warning"));

        exec.delete(updated.clone()).await.unwrap();
        assert!(exec.read(updated).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_comment_is_rejected_locally() {
        let mock = mock();
        let exec = executor(&mock, JournalEntryResource);
        let err = exec
            .create(JournalEntryModel {
                assigned_object_type: known("dcim.site"),
                assigned_object_id: Value::Known(1),
                comments: known("  "),
                ..JournalEntryModel::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation { .. }));
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_moving_an_entry_forces_replacement() {
        let prior = json!({
            "id": 4,
            "assigned_object_type": "dcim.device",
            "assigned_object_id": 1,
            "kind": "info",
            "comments": "Replaced PSU 2",
        });

        let edited = JournalEntryResource
            .schema()
            .plan(
                &json!({"assigned_object_type": "dcim.device", "assigned_object_id": 1, "comments": "Replaced PSU 1"}),
                Some(&prior),
            )
            .unwrap();
        assert!(edited.requires_replace.is_empty());
        assert_eq!(edited.planned_state["id"], 4);

        let moved = JournalEntryResource
            .schema()
            .plan(
                &json!({"assigned_object_type": "dcim.rack", "assigned_object_id": 1, "comments": "Replaced PSU 2"}),
                Some(&prior),
            )
            .unwrap();
        assert_eq!(moved.requires_replace, vec!["assigned_object_type"]);
    }

    #[tokio::test]
    async fn test_import_seeds_integer_id() {
        let exec = executor(&mock(), JournalEntryResource);
        assert_eq!(exec.import_state("17").unwrap().id, Value::Known(17));
        assert!(exec.import_state("x").is_err());
    }
}
