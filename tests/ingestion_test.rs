//! End-to-end ingestion tests: real router, real HTTP client, and a
//! wiremock stand-in for the Supabase REST backend.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webhook_gateway::api;
use webhook_gateway::app_state::AppState;
use webhook_gateway::config::StorageCredentials;
use webhook_gateway::persistence::WebhookStore;
use webhook_gateway::persistence::supabase::SupabaseStore;

const SERVICE_KEY: &str = "test-service-key";

/// Binds the gateway to an ephemeral port and serves it in the background.
async fn spawn_gateway(store: Option<Arc<dyn WebhookStore>>) -> SocketAddr {
    let app = api::build_router().with_state(AppState { store });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Storage client pointed at the mock server.
fn mock_store(server: &MockServer) -> Arc<dyn WebhookStore> {
    let credentials = StorageCredentials {
        endpoint: server.uri(),
        service_key: SERVICE_KEY.to_string(),
    };
    Arc::new(SupabaseStore::new(credentials, "webhooks".to_string()).unwrap())
}

/// A plausible PostgREST representation of the inserted row.
fn stored_row(id: i64, event: &str, email: &str, payload: Value) -> Value {
    json!({
        "id": id,
        "payload": payload,
        "event": event,
        "email": email,
        "status": "received",
        "created_at": "2026-02-10T09:30:00Z"
    })
}

#[tokio::test]
async fn non_post_is_rejected_without_storage_access() {
    let storage = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&storage)
        .await;

    let addr = spawn_gateway(Some(mock_store(&storage))).await;
    let client = reqwest::Client::new();

    for url in [
        format!("http://{addr}/"),
        format!("http://{addr}/webhook-receiver"),
    ] {
        let response = client.get(&url).send().await.unwrap();
        assert_eq!(response.status(), 405);
        assert!(response.headers().get("content-type").is_none());
        assert_eq!(response.text().await.unwrap(), "Método não permitido");
    }

    let response = client
        .delete(format!("http://{addr}/anything"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 405);

    assert!(storage.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn post_persists_record_and_returns_entry_id() {
    let payload = json!({
        "event_type": "purchase.approved",
        "customer": { "name": "Ana", "email": "a@b.com" },
        "order": { "id": "ord_1", "total": 4990 }
    });

    let storage = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/webhooks"))
        .and(header("apikey", SERVICE_KEY))
        .and(header("authorization", format!("Bearer {SERVICE_KEY}")))
        .and(header("prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(stored_row(
            42,
            "purchase.approved",
            "a@b.com",
            payload.clone(),
        )))
        .expect(1)
        .mount(&storage)
        .await;

    let addr = spawn_gateway(Some(mock_store(&storage))).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/webhook-receiver"))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack["success"], true);
    assert_eq!(ack["message"], "Webhook processado");
    assert_eq!(ack["entryId"], 42);

    // Exactly one insert, as a single-element batch of the derived record.
    let requests = storage.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let batch: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let rows = batch.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["event"], "purchase.approved");
    assert_eq!(rows[0]["email"], "a@b.com");
    assert_eq!(rows[0]["status"], "received");
    // Round-trip: the stored payload deep-equals the original body.
    assert_eq!(rows[0]["payload"], payload);
}

#[tokio::test]
async fn missing_fields_take_documented_fallbacks() {
    let payload = json!({ "unrelated": true });

    let storage = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/webhooks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(stored_row(
            7,
            "unknown_event",
            "no_email",
            payload.clone(),
        )))
        .expect(1)
        .mount(&storage)
        .await;

    let addr = spawn_gateway(Some(mock_store(&storage))).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let requests = storage.received_requests().await.unwrap();
    let batch: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(batch[0]["event"], "unknown_event");
    assert_eq!(batch[0]["email"], "no_email");
    assert_eq!(batch[0]["payload"], payload);
}

#[tokio::test]
async fn missing_credentials_fail_without_insert() {
    let addr = spawn_gateway(None).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .json(&json!({ "event_type": "purchase.approved" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack["success"], false);
    assert_eq!(ack["message"], "storage credentials not configured");
}

#[tokio::test]
async fn storage_failure_surfaces_backend_message() {
    let storage = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/webhooks"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint"
        })))
        .mount(&storage)
        .await;

    let addr = spawn_gateway(Some(mock_store(&storage))).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .json(&json!({ "event_type": "purchase.approved" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack["success"], false);
    let message = ack["message"].as_str().unwrap();
    assert!(message.contains("duplicate key value"), "message: {message}");
}

#[tokio::test]
async fn malformed_body_fails_with_parser_message() {
    let storage = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&storage)
        .await;

    let addr = spawn_gateway(Some(mock_store(&storage))).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack["success"], false);
    assert!(
        ack["message"].as_str().unwrap().contains("invalid JSON payload"),
        "message: {}",
        ack["message"]
    );
    assert!(storage.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_payloads_create_independent_records() {
    let payload = json!({ "event_type": "subscription.renewed" });

    let storage = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/webhooks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(stored_row(
            1,
            "subscription.renewed",
            "no_email",
            payload.clone(),
        )))
        .expect(2)
        .mount(&storage)
        .await;

    let addr = spawn_gateway(Some(mock_store(&storage))).await;
    let client = reqwest::Client::new();

    for _ in 0..2 {
        let response = client
            .post(format!("http://{addr}/"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    assert_eq!(storage.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn string_entry_ids_are_echoed_back() {
    let payload = json!({ "event_type": "purchase.approved" });

    let storage = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/webhooks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "0b84c3a1-7f2e-4a1d-9a6e-3f5c1d2e4b5a",
            "payload": payload,
            "event": "purchase.approved",
            "email": "no_email",
            "status": "received"
        })))
        .mount(&storage)
        .await;

    let addr = spawn_gateway(Some(mock_store(&storage))).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack["entryId"], "0b84c3a1-7f2e-4a1d-9a6e-3f5c1d2e4b5a");
}
