//! Extras models

use super::Choice;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag model matching NetBox TagSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Tag {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub object_types: Vec<String>,
}

/// Webhook model matching NetBox WebhookSerializer
///
/// `secret` is write-only and never decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Webhook {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub payload_url: String,
    pub http_method: Option<Choice>,
    #[serde(default)]
    pub http_content_type: String,
    #[serde(default)]
    pub additional_headers: String,
    #[serde(default)]
    pub body_template: String,
    pub ssl_verification: Option<bool>,
    pub ca_file_path: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Journal entry model matching NetBox JournalEntrySerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JournalEntry {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub assigned_object_type: String,
    pub assigned_object_id: i64,
    pub kind: Option<Choice>,
    #[serde(default)]
    pub comments: String,
    pub created: Option<DateTime<Utc>>,
}
