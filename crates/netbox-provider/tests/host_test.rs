//! End-to-end test of the JSON-lines host adapter

use netbox_client::MockNetBoxClient;
use netbox_provider::host::{serve, Response};
use netbox_provider::NetBoxProvider;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{duplex, AsyncReadExt};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run(mock: &MockNetBoxClient, requests: &[Value]) -> HashMap<String, Response> {
    serve_lines(Arc::new(NetBoxProvider::new(Arc::new(mock.clone()))), requests).await
}

async fn serve_lines(provider: Arc<NetBoxProvider>, requests: &[Value]) -> HashMap<String, Response> {
    let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();

    let (mut reader, writer) = duplex(1 << 20);
    serve(provider, input.as_bytes(), writer).await.unwrap();

    let mut output = String::new();
    reader.read_to_string(&mut output).await.unwrap();
    output
        .lines()
        .map(|line| {
            let response: Response = serde_json::from_str(line).unwrap();
            (response.request_id.to_string(), response)
        })
        .collect()
}

#[tokio::test]
async fn test_concurrent_requests_are_all_answered() {
    let mock = MockNetBoxClient::default();
    let requests: Vec<Value> = (0..20)
        .map(|i| {
            json!({
                "request_id": i,
                "rpc": "create",
                "type_name": "netbox_manufacturer",
                "planned_state": {"name": format!("Vendor {}", i), "slug": format!("vendor-{}", i)},
            })
        })
        .collect();

    let responses = run(&mock, &requests).await;
    assert_eq!(responses.len(), 20);
    assert!(responses.values().all(|r| r.ok));
    assert_eq!(mock.count("dcim/manufacturers"), 20);
}

#[tokio::test]
async fn test_import_read_delete_round() {
    let mock = MockNetBoxClient::default();
    let id = mock.insert("dcim/sites", json!({"name": "HQ", "slug": "hq"}));

    let imported = run(
        &mock,
        &[json!({"request_id": "import", "rpc": "import_state", "type_name": "netbox_site", "id": id.to_string()})],
    )
    .await;
    let state = imported["\"import\""].result.clone().unwrap();
    assert_eq!(state["id"], id.to_string());

    let read = run(
        &mock,
        &[json!({"request_id": "read", "rpc": "read", "type_name": "netbox_site", "state": state})],
    )
    .await;
    let state = read["\"read\""].result.clone().unwrap();
    assert_eq!(state["slug"], "hq");
    assert_eq!(state["status"], "active");

    let deleted = run(
        &mock,
        &[
            json!({"request_id": "delete", "rpc": "delete", "type_name": "netbox_site", "state": state}),
            json!({"request_id": "meta", "rpc": "metadata"}),
        ],
    )
    .await;
    assert!(deleted["\"delete\""].ok);
    assert_eq!(deleted.len(), 2);
    assert_eq!(mock.count("dcim/sites"), 0);
}

#[tokio::test]
async fn test_configure_binds_the_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .and(header("Authorization", "Token t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"netbox-version": "4.1.0"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dcim/sites/7/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let provider = Arc::new(NetBoxProvider::unconfigured());
    let read = json!({
        "request_id": "read",
        "rpc": "read",
        "type_name": "netbox_site",
        "state": {"id": "7", "name": "HQ", "slug": "hq"},
    });

    let early = serve_lines(Arc::clone(&provider), &[read.clone()]).await;
    let early = &early["\"read\""];
    assert!(!early.ok);
    assert!(early.error.as_deref().unwrap().contains("Provider not configured"));

    let configured = serve_lines(
        Arc::clone(&provider),
        &[json!({
            "request_id": "configure",
            "rpc": "configure",
            "config": {"server_url": server.uri(), "api_token": "t0k3n", "insecure": false},
        })],
    )
    .await;
    let configured = &configured["\"configure\""];
    assert!(configured.ok, "{:?}", configured.error);

    let after = serve_lines(provider, &[read]).await;
    let after = &after["\"read\""];
    assert!(after.ok, "{:?}", after.error);
    assert_eq!(after.result, Some(Value::Null));
}
