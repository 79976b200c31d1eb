//! Mock NetBox API for unit testing
//!
//! This module provides an in-memory implementation of [`NetBoxApi`] that can
//! be used in unit tests without requiring a running NetBox instance.
//!
//! Objects are stored in their request shape (foreign keys as integer IDs,
//! choice fields as plain values) and expanded on every read the way NetBox's
//! serializers do it:
//! - reference fields become nested brief objects
//! - choice fields become `{"value", "label"}`
//! - tags become nested tag objects
//! - write-only fields are dropped
//!
//! Endpoint-specific behaviour lives in the `catalog` tables.

mod catalog;

use crate::error::NetBoxError;
use crate::netbox_trait::NetBoxApi;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One call received by the mock, for assertions
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    pub method: String,
    pub endpoint: String,
    pub id: Option<i32>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct MockState {
    objects: HashMap<String, BTreeMap<i32, Map<String, Value>>>,
    next_id: i32,
    failures: HashMap<String, VecDeque<(u16, Value)>>,
    requests: Vec<MockRequest>,
    token_rejected: bool,
}

/// Mock NetBox API for testing
///
/// This mock stores resources in memory and can be configured to return
/// specific responses for testing different scenarios.
#[derive(Debug, Clone)]
pub struct MockNetBoxClient {
    base_url: String,
    state: Arc<Mutex<MockState>>,
}

impl Default for MockNetBoxClient {
    fn default() -> Self {
        Self::new("http://netbox.test")
    }
}

impl MockNetBoxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            state: Arc::new(Mutex::new(MockState {
                next_id: 1,
                ..MockState::default()
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an object to the mock store (for test setup)
    ///
    /// Server defaults are applied but references, tags and uniqueness are
    /// not checked. Returns the assigned ID.
    pub fn insert(&self, endpoint: &str, object: Value) -> i32 {
        let mut state = self.state();
        let id = state.allocate_id();
        let mut record = catalog::defaults(endpoint);
        if let Value::Object(fields) = object {
            record.extend(fields);
        }
        record.remove("id");
        stamp(&mut record, true);
        state.objects.entry(endpoint.to_string()).or_default().insert(id, record);
        id
    }

    /// Fetch an object as the API would return it (for assertions)
    pub fn get(&self, endpoint: &str, id: i32) -> Option<Value> {
        let state = self.state();
        let record = state.objects.get(endpoint)?.get(&id)?;
        Some(self.hydrate(&state, endpoint, id, record))
    }

    /// Remove an object behind the provider's back
    pub fn remove(&self, endpoint: &str, id: i32) -> bool {
        self.state()
            .objects
            .get_mut(endpoint)
            .and_then(|objects| objects.remove(&id))
            .is_some()
    }

    /// Number of objects stored for an endpoint
    pub fn count(&self, endpoint: &str) -> usize {
        self.state().objects.get(endpoint).map_or(0, BTreeMap::len)
    }

    /// Make the next call against `endpoint` fail with the given status and body
    pub fn fail_next(&self, endpoint: &str, status: u16, body: Value) {
        self.state()
            .failures
            .entry(endpoint.to_string())
            .or_default()
            .push_back((status, body));
    }

    /// Make token validation fail with 403
    pub fn reject_token(&self) {
        self.state().token_rejected = true;
    }

    /// All calls received so far
    pub fn requests(&self) -> Vec<MockRequest> {
        self.state().requests.clone()
    }

    /// Number of calls received so far
    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    fn hydrate(&self, state: &MockState, endpoint: &str, id: i32, record: &Map<String, Value>) -> Value {
        let mut out = Map::new();
        out.insert("id".to_string(), json!(id));
        out.insert("url".to_string(), json!(self.object_url(endpoint, id)));
        out.insert("display".to_string(), json!(catalog::display(record, id)));

        for (field, value) in record {
            if catalog::is_write_only(endpoint, field) {
                continue;
            }
            let expanded = if field == "tags" {
                self.hydrate_tags(state, value)
            } else if let Some(target) = catalog::reference_target(endpoint, field) {
                match value {
                    Value::Array(ids) => Value::Array(
                        ids.iter()
                            .filter_map(|v| v.as_i64().and_then(|v| i32::try_from(v).ok()))
                            .map(|ref_id| self.brief(state, target, ref_id))
                            .collect(),
                    ),
                    _ => match value.as_i64().and_then(|v| i32::try_from(v).ok()) {
                        Some(ref_id) => self.brief(state, target, ref_id),
                        None => value.clone(),
                    },
                }
            } else if catalog::is_choice(endpoint, field) {
                choice(value)
            } else {
                value.clone()
            };
            out.insert(field.clone(), expanded);
        }
        Value::Object(out)
    }

    fn hydrate_tags(&self, state: &MockState, tags: &Value) -> Value {
        let ids = tags.as_array().cloned().unwrap_or_default();
        Value::Array(
            ids.iter()
                .filter_map(|v| v.as_i64().and_then(|v| i32::try_from(v).ok()))
                .map(|tag_id| {
                    let tag = state.find("extras/tags", tag_id);
                    json!({
                        "id": tag_id,
                        "url": self.object_url("extras/tags", tag_id),
                        "display": tag.and_then(|t| t.get("name")).cloned().unwrap_or(Value::Null),
                        "name": tag.and_then(|t| t.get("name")).cloned().unwrap_or(Value::Null),
                        "slug": tag.and_then(|t| t.get("slug")).cloned().unwrap_or(Value::Null),
                        "color": tag.and_then(|t| t.get("color")).cloned().unwrap_or(Value::Null),
                    })
                })
                .collect(),
        )
    }

    fn brief(&self, state: &MockState, endpoint: &str, id: i32) -> Value {
        let mut brief = Map::new();
        brief.insert("id".to_string(), json!(id));
        brief.insert("url".to_string(), json!(self.object_url(endpoint, id)));
        match state.find(endpoint, id) {
            Some(target) => {
                brief.insert("display".to_string(), json!(catalog::display(target, id)));
                for key in ["name", "slug", "model", "address", "cid", "vid"] {
                    if let Some(v) = target.get(key) {
                        brief.insert(key.to_string(), v.clone());
                    }
                }
            }
            None => {
                brief.insert("display".to_string(), json!(format!("#{}", id)));
            }
        }
        Value::Object(brief)
    }

    fn object_url(&self, endpoint: &str, id: i32) -> String {
        format!("{}/api/{}/{}/", self.base_url, endpoint, id)
    }

    /// Merge a request body into `record`, enforcing what NetBox validates
    fn apply_body(
        state: &MockState,
        method: &str,
        endpoint: &str,
        own_id: Option<i32>,
        record: &mut Map<String, Value>,
        body: &Value,
    ) -> Result<(), NetBoxError> {
        let incoming = body.as_object().ok_or_else(|| {
            bad_request(method, endpoint, json!({"non_field_errors": ["Invalid data. Expected a dictionary."]}))
        })?;

        for (field, value) in incoming {
            match field.as_str() {
                "id" | "url" | "display" => {}
                "tags" => {
                    let ids = resolve_tags(state, value)
                        .map_err(|msg| bad_request(method, endpoint, json!({"tags": [msg]})))?;
                    record.insert(field.clone(), json!(ids));
                }
                "custom_fields" => {
                    let current = record
                        .entry("custom_fields".to_string())
                        .or_insert_with(|| json!({}));
                    if let (Some(current), Some(update)) = (current.as_object_mut(), value.as_object()) {
                        for (k, v) in update {
                            current.insert(k.clone(), v.clone());
                        }
                    }
                }
                _ => {
                    let value = match catalog::reference_target(endpoint, field) {
                        Some(target) => {
                            let check = |ref_id: &Value| -> Result<Value, NetBoxError> {
                                let ref_id = ref_id.get("id").unwrap_or(ref_id);
                                if let Some(raw) = ref_id.as_i64() {
                                    let exists = i32::try_from(raw)
                                        .ok()
                                        .and_then(|id| state.find(target, id))
                                        .is_some();
                                    if !exists {
                                        return Err(bad_request(
                                            method,
                                            endpoint,
                                            json!({ field.clone(): [format!("Invalid pk \"{}\" - object does not exist.", raw)] }),
                                        ));
                                    }
                                }
                                Ok(ref_id.clone())
                            };
                            match value {
                                Value::Array(items) => {
                                    Value::Array(items.iter().map(check).collect::<Result<_, _>>()?)
                                }
                                _ => check(value)?,
                            }
                        }
                        None => value.clone(),
                    };
                    record.insert(field.clone(), value);
                }
            }
        }
        catalog::derive(endpoint, record);

        if let Some(slug) = record.get("slug").and_then(Value::as_str).filter(|s| !s.is_empty()) {
            let taken = state.objects.get(endpoint).is_some_and(|objects| {
                objects.iter().any(|(id, other)| {
                    Some(*id) != own_id && other.get("slug").and_then(Value::as_str) == Some(slug)
                })
            });
            if taken {
                let model = endpoint.rsplit('/').next().unwrap_or(endpoint).trim_end_matches('s').replace('-', " ");
                return Err(bad_request(
                    method,
                    endpoint,
                    json!({"slug": [format!("{} with this slug already exists.", model)]}),
                ));
            }
        }
        Ok(())
    }

    /// Record the call and pop an injected failure, if any
    fn begin(&self, state: &mut MockState, method: &str, endpoint: &str, id: Option<i32>, body: Option<&Value>) -> Result<(), NetBoxError> {
        state.requests.push(MockRequest {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            id,
            body: body.cloned(),
        });
        match state.failures.get_mut(endpoint).and_then(VecDeque::pop_front) {
            Some((404, body)) => Err(NetBoxError::NotFound(format!("{} /api/{}/ - {}", method, endpoint, body))),
            Some((status, body)) => Err(NetBoxError::Api {
                method: method.to_string(),
                path: format!("/api/{}/", endpoint),
                status,
                body: body.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn write(&self, method: &str, endpoint: &str, id: i32, body: &Value) -> Result<Value, NetBoxError> {
        let mut state = self.state();
        self.begin(&mut state, method, endpoint, Some(id), Some(body))?;
        let mut record = state
            .find(endpoint, id)
            .cloned()
            .ok_or_else(|| not_found(method, endpoint, id))?;
        Self::apply_body(&state, method, endpoint, Some(id), &mut record, body)?;
        stamp(&mut record, false);
        state.objects.entry(endpoint.to_string()).or_default().insert(id, record);
        let record = state.find(endpoint, id).cloned().unwrap_or_default();
        Ok(self.hydrate(&state, endpoint, id, &record))
    }
}

impl MockState {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn find(&self, endpoint: &str, id: i32) -> Option<&Map<String, Value>> {
        self.objects.get(endpoint)?.get(&id)
    }
}

fn stamp(record: &mut Map<String, Value>, created: bool) {
    let now = json!(Utc::now().to_rfc3339());
    if created {
        record.insert("created".to_string(), now.clone());
    }
    record.insert("last_updated".to_string(), now);
}

fn choice(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::String(s) if s.is_empty() => Value::Null,
        Value::String(s) => json!({"value": s, "label": catalog::choice_label(s)}),
        other => json!({"value": other, "label": other.to_string()}),
    }
}

/// Resolve tag references (`{"slug"}`, `{"name"}`, an ID or a bare slug) to tag IDs
fn resolve_tags(state: &MockState, tags: &Value) -> Result<Vec<i32>, String> {
    let Some(items) = tags.as_array() else {
        return Ok(Vec::new());
    };
    let known = state.objects.get("extras/tags");
    items
        .iter()
        .map(|item| {
            let (key, wanted) = match item {
                Value::Object(o) if o.contains_key("slug") => ("slug", o["slug"].clone()),
                Value::Object(o) if o.contains_key("name") => ("name", o["name"].clone()),
                Value::Number(_) => ("id", item.clone()),
                Value::String(_) => ("slug", item.clone()),
                other => return Err(format!("Invalid tag: {}", other)),
            };
            known
                .and_then(|tags| {
                    tags.iter().find(|(id, tag)| {
                        if key == "id" {
                            wanted.as_i64() == Some(i64::from(**id))
                        } else {
                            tag.get(key) == Some(&wanted)
                        }
                    })
                })
                .map(|(id, _)| *id)
                .ok_or_else(|| {
                    format!(
                        "Related object not found using the provided attributes: {{'{}': {}}}",
                        key, wanted
                    )
                })
        })
        .collect()
}

fn matches_filter(record: &Map<String, Value>, id: i32, key: &str, wanted: &str) -> bool {
    if key == "id" {
        return id.to_string() == wanted;
    }
    if let Some(field) = key.strip_suffix("__ie") {
        return record
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| s.eq_ignore_ascii_case(wanted));
    }
    let field = key.strip_suffix("_id").filter(|f| record.contains_key(*f)).unwrap_or(key);
    match record.get(field) {
        Some(Value::String(s)) => s == wanted,
        Some(Value::Number(n)) => n.to_string() == wanted,
        Some(Value::Bool(b)) => b.to_string() == wanted,
        Some(Value::Object(o)) => o.get("id").is_some_and(|v| v.to_string() == wanted),
        _ => false,
    }
}

fn bad_request(method: &str, endpoint: &str, body: Value) -> NetBoxError {
    NetBoxError::Api {
        method: method.to_string(),
        path: format!("/api/{}/", endpoint),
        status: 400,
        body: body.to_string(),
    }
}

fn not_found(method: &str, endpoint: &str, id: i32) -> NetBoxError {
    NetBoxError::NotFound(format!(
        "{} /api/{}/{}/ - {{\"detail\": \"No {} matches the given query.\"}}",
        method, endpoint, id, endpoint
    ))
}

#[async_trait::async_trait]
impl NetBoxApi for MockNetBoxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        if self.state().token_rejected {
            return Err(NetBoxError::Authentication(
                "GET /api/status/ failed: 403 Forbidden - {\"detail\": \"Invalid token\"}".to_string(),
            ));
        }
        Ok(())
    }

    async fn list(
        &self,
        endpoint: &str,
        filters: &[(&str, &str)],
        _fetch_all: bool,
    ) -> Result<Vec<Value>, NetBoxError> {
        let mut state = self.state();
        self.begin(&mut state, "GET", endpoint, None, None)?;
        let Some(objects) = state.objects.get(endpoint) else {
            return Ok(Vec::new());
        };
        Ok(objects
            .iter()
            .filter(|(id, record)| {
                filters
                    .iter()
                    .filter(|(k, _)| !matches!(*k, "limit" | "offset" | "brief"))
                    .all(|(k, v)| matches_filter(record, **id, k, v))
            })
            .map(|(id, record)| self.hydrate(&state, endpoint, *id, record))
            .collect())
    }

    async fn retrieve(&self, endpoint: &str, id: i32) -> Result<Value, NetBoxError> {
        let mut state = self.state();
        self.begin(&mut state, "GET", endpoint, Some(id), None)?;
        let record = state.find(endpoint, id).ok_or_else(|| not_found("GET", endpoint, id))?;
        Ok(self.hydrate(&state, endpoint, id, record))
    }

    async fn create(&self, endpoint: &str, body: &Value) -> Result<Value, NetBoxError> {
        let mut state = self.state();
        self.begin(&mut state, "POST", endpoint, None, Some(body))?;
        let mut record = catalog::defaults(endpoint);
        Self::apply_body(&state, "POST", endpoint, None, &mut record, body)?;
        stamp(&mut record, true);
        let id = state.allocate_id();
        let hydrated = self.hydrate(&state, endpoint, id, &record);
        state.objects.entry(endpoint.to_string()).or_default().insert(id, record);
        Ok(hydrated)
    }

    async fn update(&self, endpoint: &str, id: i32, body: &Value) -> Result<Value, NetBoxError> {
        self.write("PUT", endpoint, id, body)
    }

    async fn partial_update(&self, endpoint: &str, id: i32, body: &Value) -> Result<Value, NetBoxError> {
        self.write("PATCH", endpoint, id, body)
    }

    async fn destroy(&self, endpoint: &str, id: i32) -> Result<(), NetBoxError> {
        let mut state = self.state();
        self.begin(&mut state, "DELETE", endpoint, Some(id), None)?;
        state
            .objects
            .get_mut(endpoint)
            .and_then(|objects| objects.remove(&id))
            .map(|_| ())
            .ok_or_else(|| not_found("DELETE", endpoint, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_applies_defaults_and_expands_choices() {
        let mock = MockNetBoxClient::default();
        let cable = mock
            .create("dcim/cables", &json!({"a_terminations": [], "b_terminations": []}))
            .await
            .unwrap();
        assert_eq!(cable["status"]["value"], "connected");
        assert_eq!(cable["status"]["label"], "Connected");
        assert_eq!(cable["description"], "");
        assert_eq!(cable["url"], format!("http://netbox.test/api/dcim/cables/{}/", cable["id"]));
    }

    #[tokio::test]
    async fn test_references_expand_to_nested_objects() {
        let mock = MockNetBoxClient::default();
        let group = mock.insert("tenancy/tenant-groups", json!({"name": "Customers", "slug": "customers"}));
        let tenant = mock
            .create("tenancy/tenants", &json!({"name": "Acme", "slug": "acme", "group": group}))
            .await
            .unwrap();
        assert_eq!(tenant["group"]["id"], group);
        assert_eq!(tenant["group"]["slug"], "customers");
    }

    #[tokio::test]
    async fn test_missing_reference_is_rejected() {
        let mock = MockNetBoxClient::default();
        let err = mock
            .create("tenancy/tenants", &json!({"name": "Acme", "slug": "acme", "group": 99}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.field_errors().unwrap().contains_key("group"));
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let mock = MockNetBoxClient::default();
        mock.create("dcim/manufacturers", &json!({"name": "Cisco", "slug": "cisco"})).await.unwrap();
        let err = mock
            .create("dcim/manufacturers", &json!({"name": "Cisco 2", "slug": "cisco"}))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_tags_resolve_by_slug() {
        let mock = MockNetBoxClient::default();
        let tag = mock.insert("extras/tags", json!({"name": "Prod", "slug": "prod"}));
        let site = mock
            .create("dcim/sites", &json!({"name": "HQ", "slug": "hq", "tags": [{"name": "Prod", "slug": "prod"}]}))
            .await
            .unwrap();
        assert_eq!(site["tags"][0]["id"], tag);
        assert_eq!(site["tags"][0]["slug"], "prod");

        let err = mock
            .create("dcim/sites", &json!({"name": "DC", "slug": "dc", "tags": [{"slug": "missing"}]}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_write_only_fields_are_not_returned() {
        let mock = MockNetBoxClient::default();
        let hook = mock
            .create("extras/webhooks", &json!({"name": "hook", "payload_url": "https://x", "secret": "s3cr3t"}))
            .await
            .unwrap();
        assert!(hook.get("secret").is_none());
        assert_eq!(hook["http_method"], "POST");
    }

    #[tokio::test]
    async fn test_patch_merges_fields() {
        let mock = MockNetBoxClient::default();
        let id = mock.insert("dcim/regions", json!({"name": "EU", "slug": "eu", "description": "Europe"}));
        let patched = mock.partial_update("dcim/regions", id, &json!({"description": ""})).await.unwrap();
        assert_eq!(patched["description"], "");
        assert_eq!(patched["name"], "EU");
    }

    #[tokio::test]
    async fn test_missing_objects_return_not_found() {
        let mock = MockNetBoxClient::default();
        assert!(mock.retrieve("dcim/sites", 7).await.unwrap_err().is_not_found());
        assert!(mock.destroy("dcim/sites", 7).await.unwrap_err().is_not_found());
        assert!(mock.update("dcim/sites", 7, &json!({})).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_filters_on_fields_and_references() {
        let mock = MockNetBoxClient::default();
        let site = mock.insert("dcim/sites", json!({"name": "HQ", "slug": "hq"}));
        mock.insert("dcim/racks", json!({"name": "R1", "site": site}));
        mock.insert("dcim/racks", json!({"name": "R2", "site": site}));
        let found = mock.list("dcim/racks", &[("name", "R2")], true).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(mock.list("dcim/racks", &[("name", "r2")], true).await.unwrap().is_empty());
        let folded = mock.list("dcim/racks", &[("name__ie", "r2")], true).await.unwrap();
        assert_eq!(folded.len(), 1);
        let site_id = site.to_string();
        let by_site = mock.list("dcim/racks", &[("site_id", site_id.as_str())], true).await.unwrap();
        assert_eq!(by_site.len(), 2);
    }

    #[tokio::test]
    async fn test_injected_failure_is_consumed_once() {
        let mock = MockNetBoxClient::default();
        mock.fail_next("dcim/sites", 500, json!({"detail": "boom"}));
        assert_eq!(mock.list("dcim/sites", &[], true).await.unwrap_err().status(), Some(500));
        assert!(mock.list("dcim/sites", &[], true).await.is_ok());
        assert_eq!(mock.request_count(), 2);
    }
}
