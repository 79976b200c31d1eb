//! NetBox client errors

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur when interacting with the NetBox API
#[derive(Debug, Error)]
pub enum NetBoxError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NetBox API returned a non-success status
    #[error("NetBox API error: {method} {path} failed: {status} - {body}")]
    Api {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (invalid token, expired, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl NetBoxError {
    /// Whether the API reported the object as missing (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, NetBoxError::NotFound(_))
    }

    /// HTTP status code reported by NetBox, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            NetBoxError::Api { status, .. } => Some(*status),
            NetBoxError::NotFound(_) => Some(404),
            NetBoxError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body of an API error
    pub fn body(&self) -> Option<&str> {
        match self {
            NetBoxError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Per-field validation messages from a 400 response.
    ///
    /// NetBox reports serializer errors as `{"field": ["message", ...]}`.
    /// Non-list values (e.g. `{"detail": "..."}`) are kept as single messages.
    pub fn field_errors(&self) -> Option<BTreeMap<String, Vec<String>>> {
        if self.status() != Some(400) {
            return None;
        }
        let parsed: serde_json::Value = serde_json::from_str(self.body()?).ok()?;
        let object = parsed.as_object()?;

        let mut errors = BTreeMap::new();
        for (field, messages) in object {
            let messages = match messages {
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|m| m.as_str().map_or_else(|| m.to_string(), str::to_string))
                    .collect(),
                serde_json::Value::String(s) => vec![s.clone()],
                other => vec![other.to_string()],
            };
            errors.insert(field.clone(), messages);
        }
        Some(errors)
    }

    /// Fields NetBox rejected because another object already holds the value
    pub fn duplicate_fields(&self) -> Vec<String> {
        self.field_errors()
            .map(|errors| {
                errors
                    .into_iter()
                    .filter(|(_, messages)| messages.iter().any(|m| is_duplicate_message(m)))
                    .map(|(field, _)| field)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether this is a uniqueness violation on create/update
    pub fn is_duplicate(&self) -> bool {
        !self.duplicate_fields().is_empty()
    }
}

fn is_duplicate_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("already exists")
        || lower.contains("must be unique")
        || (lower.contains("with this") && lower.contains("exists"))
}
