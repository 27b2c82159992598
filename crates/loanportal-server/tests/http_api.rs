#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use loanportal_core::portal::NewKeyFlag;
use loanportal_server::build_router;
use loanportal_server::state::AppState;

fn app() -> Router {
    build_router(Arc::new(AppState::seeded()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

#[tokio::test]
async fn health_sets_hardening_headers() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn generate_key_returns_secret_once() {
    let app = app();

    let (status, body) = post(&app, "/v1/environments/uat/keys", json!({ "name": "Second Key" })).await;
    assert_eq!(status, StatusCode::OK);

    let result = &body["result"];
    let secret = result["secret"].as_str().unwrap();
    assert!(secret.starts_with("loan_pk_uat_"));
    assert_eq!(result["key"]["id"], "2");
    assert_eq!(result["key"]["last_used"], "Never used");
    assert!(result["key"]["secret_prefix"].as_str().unwrap().ends_with("****"));
    assert_eq!(body["notifications"][0]["kind"], "success");
    assert_eq!(body["notifications"][0]["message"], "API key generated successfully!");

    let (_, listed) = get(&app, "/v1/environments/uat/keys").await;
    let keys = listed["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 2);
    assert!(!listed.to_string().contains(secret));
}

#[tokio::test]
async fn blank_key_name_is_rejected() {
    let app = app();

    let (status, body) = post(&app, "/v1/environments/dev/keys", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["message"], "Please enter a name for your API key");

    let (_, listed) = get(&app, "/v1/environments/dev/keys").await;
    assert_eq!(listed["keys"].as_array().unwrap().len(), 1);

    // The rejected action's notification does not leak into the next one.
    let (_, body) = post(&app, "/v1/keys/new/dismiss", json!({})).await;
    assert_eq!(body["notifications"], json!([]));
}

#[tokio::test]
async fn unknown_environment_is_not_found() {
    let app = app();
    let (status, body) = get(&app, "/v1/environments/staging/keys").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn copy_then_dismiss_new_key() {
    let app = app();
    post(&app, "/v1/environments/prod/keys", json!({ "name": "Deploy" })).await;

    let (_, body) = post(&app, "/v1/keys/new/copy", json!({})).await;
    assert_eq!(body["copied"], true);
    assert_eq!(body["notifications"][0]["message"], "Copied to clipboard");

    post(&app, "/v1/keys/new/dismiss", json!({})).await;
    let (_, body) = post(&app, "/v1/keys/new/copy", json!({})).await;
    assert_eq!(body["copied"], false);
    assert_eq!(body["notifications"], json!([]));
}

#[tokio::test]
async fn deleting_missing_ids_still_notifies() {
    let app = app();

    let (status, body) = delete(&app, "/v1/environments/dev/keys/99").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], Value::Null);
    assert_eq!(body["notifications"][0]["message"], "API key deleted successfully");

    let (_, body) = delete(&app, "/v1/environments/dev/ip-allowlist/99").await;
    assert_eq!(body["result"], Value::Null);
    assert_eq!(body["notifications"][0]["message"], "IP address removed successfully");

    let (_, body) = delete(&app, "/v1/environments/dev/webhooks/99").await;
    assert_eq!(body["result"], Value::Null);
    assert_eq!(body["notifications"][0]["message"], "Webhook removed successfully");

    let (_, body) = delete(&app, "/v1/environments/dev/keys/1").await;
    assert_eq!(body["result"]["name"], "Development Key");

    let (_, listed) = get(&app, "/v1/environments/dev/keys").await;
    assert_eq!(listed["keys"], json!([]));
}

#[tokio::test]
async fn missing_body_fields_get_json_errors() {
    let app = app();

    for uri in [
        "/v1/environments/dev/keys",
        "/v1/environments/dev/ip-allowlist",
        "/v1/environments/dev/webhooks",
    ] {
        let (status, body) = post(&app, uri, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "bad_request", "{uri}");
        assert!(body["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn dismissed_secret_is_not_kept_by_the_server() {
    let state = Arc::new(AppState::seeded());
    let app = build_router(Arc::clone(&state));

    let (_, body) = post(&app, "/v1/environments/uat/keys", json!({ "name": "Once" })).await;
    let secret = body["result"]["secret"].as_str().unwrap().to_owned();
    post(&app, "/v1/keys/new/copy", json!({})).await;
    post(&app, "/v1/keys/new/dismiss", json!({})).await;

    assert_eq!(state.portal.lock().await.new_key(), &NewKeyFlag::Hidden);

    let (_, snapshot) = get(&app, "/v1/environments/uat").await;
    assert!(!snapshot.to_string().contains(&secret));
}

#[tokio::test]
async fn rotate_keeps_identity() {
    let app = app();
    let (_, body) = post(&app, "/v1/environments/dev/keys/1/rotate", json!({})).await;

    assert_eq!(body["result"]["key"]["id"], "1");
    assert_eq!(body["result"]["key"]["name"], "Development Key");
    assert_ne!(body["result"]["key"]["secret_prefix"], "loan_pk_dev_aK7h");
}

#[tokio::test]
async fn ip_allowlist_round_trip() {
    let app = app();

    let (status, body) = post(
        &app,
        "/v1/environments/prod/ip-allowlist",
        json!({ "address": "10.0.0.7", "description": "Bastion" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["result"]["id"].as_str().unwrap().to_owned();
    assert_eq!(body["notifications"][0]["message"], "IP address added successfully");

    let (_, body) = delete(&app, &format!("/v1/environments/prod/ip-allowlist/{id}")).await;
    assert_eq!(body["notifications"][0]["message"], "IP address removed successfully");

    let (_, listed) = get(&app, "/v1/environments/prod/ip-allowlist").await;
    let addresses: Vec<_> = listed["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["address"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(addresses, ["198.51.100.1"]);
}

#[tokio::test]
async fn malformed_ip_is_rejected() {
    let app = app();
    let (status, body) = post(
        &app,
        "/v1/environments/dev/ip-allowlist",
        json!({ "address": "256.1.1" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter a valid IP address");
}

#[tokio::test]
async fn webhook_toggle_and_validation() {
    let app = app();

    let (status, body) = post(
        &app,
        "/v1/environments/dev/webhooks",
        json!({ "url": "https://hooks.example.com/in", "events": "loan.created, ,loan.closed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["events"], json!(["loan.created", "loan.closed"]));
    assert_eq!(body["result"]["event_list"], "loan.created, loan.closed");
    assert_eq!(body["result"]["active"], true);

    let (_, body) = post(&app, "/v1/environments/prod/webhooks/1/toggle", json!({})).await;
    assert_eq!(body["result"]["active"], true);
    assert_eq!(body["notifications"], json!([]));

    let (status, body) = post(
        &app,
        "/v1/environments/dev/webhooks",
        json!({ "url": "not a url", "events": "loan.created" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter a valid URL");

    let (_, body) = post(
        &app,
        "/v1/environments/dev/webhooks",
        json!({ "url": "https://hooks.example.com/in", "events": " , " }),
    )
    .await;
    assert_eq!(body["message"], "Please enter at least one event");
}

#[tokio::test]
async fn dashboard_reflects_registry() {
    let app = app();
    post(&app, "/v1/environments/uat/keys", json!({ "name": "Extra" })).await;

    let (status, body) = get(&app, "/v1/dashboard/uat").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_keys"], 2);
    assert_eq!(body["usage"]["api_calls_7d"], 257);
}

#[tokio::test]
async fn endpoints_carry_badges() {
    let (_, body) = get(&app(), "/v1/environments/dev/endpoints").await;
    let endpoints = body["endpoints"].as_array().unwrap();
    assert_eq!(endpoints.len(), 7);
    assert_eq!(endpoints[3]["method"], "PATCH");
    assert_eq!(endpoints[3]["method_badge"], "purple");
    assert_eq!(endpoints[0]["status"], "Operational");
}

#[tokio::test]
async fn status_profiles() {
    let app = app();

    let (_, body) = get(&app, "/v1/status").await;
    assert_eq!(body["headline"], "All Systems Operational");
    assert_eq!(body["incidents"].as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/v1/status/prod").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base_url"], "https://api.loanportal.example");

    let (status, _) = get(&app, "/v1/status/dev").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn docs_search_and_lookup() {
    let app = app();

    let (_, body) = get(&app, "/v1/docs").await;
    assert_eq!(body["sections"].as_array().unwrap().len(), 6);

    let (_, body) = get(&app, "/v1/docs?q=WEBHOOK").await;
    let ids: Vec<_> = body["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_owned())
        .collect();
    assert!(ids.contains(&"webhooks".to_owned()));

    let (status, _) = get(&app, "/v1/docs/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn collections_and_downloads() {
    let app = app();

    let (_, body) = get(&app, "/v1/collections?env=prod").await;
    assert_eq!(body["collections"].as_array().unwrap().len(), 3);

    let (_, body) = post(&app, "/v1/collections/4/download", json!({})).await;
    assert_eq!(body["notifications"][0]["message"], "Downloading Loan API - Webhooks");

    let (_, body) = post(&app, "/v1/environment-files/uat/download", json!({})).await;
    assert_eq!(body["notifications"][0]["message"], "Downloading UAT environment");

    let (status, _) = post(&app, "/v1/collections/nope/download", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&app, "/v1/clients").await;
    assert_eq!(body["clients"].as_array().unwrap().len(), 6);
}
