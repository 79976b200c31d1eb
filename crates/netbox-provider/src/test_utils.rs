//! Test utilities for unit testing resources
//!
//! This module provides helpers for wiring resources to the in-memory mock.

#![cfg(test)]

use crate::crud::{ResourceDef, ResourceExecutor};
use crate::metadata::TagModel;
use crate::value::Value;
use netbox_client::MockNetBoxClient;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Mock NetBox shared between the test and the executor
pub fn mock() -> MockNetBoxClient {
    MockNetBoxClient::new("http://netbox.test")
}

/// Executor for `def` backed by `mock`
pub fn executor<R: ResourceDef>(mock: &MockNetBoxClient, def: R) -> ResourceExecutor<R> {
    ResourceExecutor::new(Arc::new(mock.clone()), def)
}

/// Register a tag in the mock and return it as configured in state
pub fn tag(mock: &MockNetBoxClient, name: &str, slug: &str) -> TagModel {
    mock.insert("extras/tags", json!({"name": name, "slug": slug}));
    TagModel {
        name: name.to_string(),
        slug: slug.to_string(),
    }
}

pub fn tag_set(tags: Vec<TagModel>) -> Value<BTreeSet<TagModel>> {
    Value::Known(tags.into_iter().collect())
}

pub fn known(s: &str) -> Value<String> {
    Value::known(s)
}
