//! Provider error types.
//!
//! Errors are split the way the host reports them: local validation problems
//! are caught before any API call, API failures carry the operation and the
//! NetBox status/body, and uniqueness conflicts on create carry enough
//! context to import the existing object.

use netbox_client::NetBoxError;
use thiserror::Error;

/// Errors that can occur while planning or applying a resource
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Configuration value rejected before contacting NetBox
    #[error("Invalid value for {attribute}: {message}")]
    Validation { attribute: String, message: String },

    /// Identifier could not be parsed as a NetBox ID
    #[error("Invalid ID {0:?}: expected a positive 32-bit integer")]
    InvalidId(String),

    /// 64-bit value does not fit the 32-bit NetBox field
    #[error("Value {value} for {attribute} overflows a 32-bit integer")]
    IntegerOverflow { attribute: String, value: i64 },

    /// A name/slug/ID reference could not be resolved to exactly one object
    #[error("Lookup of {target} {value:?} failed: {message}")]
    Lookup {
        target: String,
        value: String,
        message: String,
    },

    /// Create rejected because an object with the same unique value exists
    #[error(
        "{resource} with {field} {value:?} already exists in NetBox{}. {hint}",
        existing_suffix(.existing_id)
    )]
    Duplicate {
        resource: String,
        field: String,
        value: String,
        existing_id: Option<i32>,
        hint: String,
    },

    /// NetBox API call failed
    #[error("Error {operation}: {source}")]
    Api {
        operation: String,
        #[source]
        source: NetBoxError,
    },

    /// State or plan JSON did not match the resource model
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Provider configuration is incomplete or malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The host asked for a resource type this provider does not serve
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// A resource operation arrived before the provider was configured
    #[error("Provider not configured: send a configure request before {0}")]
    NotConfigured(String),

    /// The host sent a request this provider cannot serve
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

fn existing_suffix(existing_id: &Option<i32>) -> String {
    existing_id.map(|id| format!(" (ID: {id})")).unwrap_or_default()
}

impl ProviderError {
    /// Wrap a NetBox error with a description of what was being attempted
    pub fn api(operation: impl Into<String>, source: NetBoxError) -> Self {
        ProviderError::Api {
            operation: operation.into(),
            source,
        }
    }

    pub fn validation(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::Validation {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Whether the error was raised locally, before any API call
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ProviderError::Validation { .. }
                | ProviderError::InvalidId(_)
                | ProviderError::IntegerOverflow { .. }
                | ProviderError::Serialization(_)
        )
    }

    /// HTTP status of the underlying API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { source, .. } => source.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_carries_operation_and_body() {
        let err = ProviderError::api(
            "creating cable",
            NetBoxError::Api {
                method: "POST".to_string(),
                path: "/api/dcim/cables/".to_string(),
                status: 400,
                body: "{\"a_terminations\": [\"required\"]}".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("creating cable"));
        assert!(msg.contains("400"));
        assert!(msg.contains("a_terminations"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_duplicate_message_includes_existing_id_and_hint() {
        let err = ProviderError::Duplicate {
            resource: "netbox_tenant".to_string(),
            field: "slug".to_string(),
            value: "acme".to_string(),
            existing_id: Some(12),
            hint: "Import it with: terraform import netbox_tenant.<name> 12".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("(ID: 12)"));
        assert!(msg.contains("terraform import netbox_tenant.<name> 12"));
    }

    #[test]
    fn test_local_errors() {
        assert!(ProviderError::InvalidId("abc".to_string()).is_local());
        assert!(!ProviderError::UnknownResource("netbox_x".to_string()).is_local());
    }
}
