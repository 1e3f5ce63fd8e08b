//! HTTP-level integration tests for the mode-aware dispatcher.
//!
//! A loopback axum server stands in for the backend and echoes back what
//! it saw (path, credentials, content type), so these tests prove the
//! dispatch contract end to end: partition selection, credential
//! attachment, body defaults, and response classification.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::RawQuery;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use siteproof_client::{ApiClient, ApiError, RequestContext, StaticTokenSource};
use siteproof_types::{NewUser, Role, TaskEvidenceType};
use uuid::Uuid;

// ── Echo server ─────────────────────────────────────────────────

fn header(headers: &HeaderMap, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null)
}

fn echo(seen_path: &str, headers: &HeaderMap, query: Option<String>) -> Json<Value> {
    Json(json!({
        "path": seen_path,
        "query": query,
        "authorization": header(headers, "authorization"),
        "demo_role": header(headers, "x-demo-role"),
        "content_type": header(headers, "content-type"),
    }))
}

fn sample_user(email: &str) -> Value {
    json!({
        "id": "123e4567-e89b-12d3-a456-426614174000",
        "org_id": "223e4567-e89b-12d3-a456-426614174000",
        "email": email,
        "role": "manager",
        "created_at": "2026-01-10T12:00:00Z",
        "updated_at": "2026-01-10T12:00:00Z"
    })
}

fn sample_task_evidence(content_type: Value) -> Value {
    json!({
        "id": "323e4567-e89b-12d3-a456-426614174000",
        "task_id": "423e4567-e89b-12d3-a456-426614174000",
        "type": "BEFORE",
        "s3_key": content_type,
        "created_at": "2026-01-10T12:00:00Z"
    })
}

async fn start_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/v1/tasks",
            get(|headers: HeaderMap, RawQuery(query): RawQuery| async move {
                echo("/v1/tasks", &headers, query)
            }),
        )
        .route(
            "/demo/tasks",
            get(|headers: HeaderMap, RawQuery(query): RawQuery| async move {
                echo("/demo/tasks", &headers, query)
            }),
        )
        .route("/v1/tasks/:id", delete(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/v1/reports",
            get(|| async { (StatusCode::FORBIDDEN, "nope") }),
        )
        .route("/v1/inspections", get(|| async { "not json {" }))
        .route(
            "/v1/organizations",
            post(|headers: HeaderMap, body: String| async move {
                Json(json!({
                    "content_type": header(&headers, "content-type"),
                    "body": body,
                }))
            }),
        )
        .route(
            "/v1/users",
            post(|Json(body): Json<Value>| async move {
                let email = body["email"].as_str().unwrap_or_default().to_string();
                if email.starts_with("new") {
                    (StatusCode::CREATED, Json(sample_user(&email)))
                } else {
                    (StatusCode::OK, Json(sample_user(&email)))
                }
            }),
        )
        .route(
            "/demo/task-evidence",
            post(|headers: HeaderMap| async move {
                Json(sample_task_evidence(header(&headers, "content-type")))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });
    addr
}

async fn client() -> (ApiClient, RequestContext) {
    let addr = start_server().await;
    let client = ApiClient::new(format!("http://{addr}")).expect("build client");
    (client, RequestContext::Live)
}

// ── Partition + credential selection ────────────────────────────

#[tokio::test]
async fn demo_call_lands_on_demo_partition_with_role_header() {
    let (client, _) = client().await;
    let ctx = RequestContext::Demo {
        role: Role::Inspector,
    };

    let seen: Value = client
        .request(&ctx, reqwest::Method::GET, "/v1/tasks", Default::default())
        .await
        .expect("demo dispatch");

    assert_eq!(seen["path"], "/demo/tasks");
    assert_eq!(seen["demo_role"], "inspector");
    assert_eq!(seen["authorization"], Value::Null);
}

#[tokio::test]
async fn live_call_keeps_path_and_carries_bearer_token() {
    let addr = start_server().await;
    let client = ApiClient::new(format!("http://{addr}"))
        .expect("build client")
        .with_token_source(Arc::new(StaticTokenSource::new("id-token-123")));

    let seen: Value = client
        .request(
            &RequestContext::Live,
            reqwest::Method::GET,
            "/v1/tasks",
            Default::default(),
        )
        .await
        .expect("live dispatch");

    assert_eq!(seen["path"], "/v1/tasks");
    assert_eq!(seen["authorization"], "Bearer id-token-123");
    assert_eq!(seen["demo_role"], Value::Null);
}

#[tokio::test]
async fn live_call_without_identity_is_anonymous() {
    let (client, ctx) = client().await;

    let seen: Value = client
        .request(&ctx, reqwest::Method::GET, "/v1/tasks", Default::default())
        .await
        .expect("anonymous dispatch");

    assert_eq!(seen["authorization"], Value::Null);
    assert_eq!(seen["demo_role"], Value::Null);
}

// ── Body handling ───────────────────────────────────────────────

#[tokio::test]
async fn json_body_gets_content_type_default() {
    let (client, ctx) = client().await;

    let seen: Value = client
        .request(
            &ctx,
            reqwest::Method::POST,
            "/v1/organizations",
            siteproof_client::RequestOptions::json(&json!({ "name": "Acme" })).unwrap(),
        )
        .await
        .expect("create dispatch");

    assert_eq!(seen["content_type"], "application/json");
    assert_eq!(seen["body"], "{\"name\":\"Acme\"}");
}

#[tokio::test]
async fn multipart_upload_is_not_given_the_json_default() {
    let (client, _) = client().await;
    let ctx = RequestContext::Demo {
        role: Role::Cleaner,
    };

    let evidence = client
        .create_task_evidence_upload(
            &ctx,
            Uuid::new_v4(),
            TaskEvidenceType::Before,
            "before.jpg".into(),
            vec![0xFF, 0xD8, 0xFF],
        )
        .await
        .expect("upload dispatch");

    // the echo server smuggles the observed content type back in s3_key
    let content_type = evidence.s3_key.expect("content type echoed");
    assert!(
        content_type.starts_with("multipart/form-data"),
        "expected multipart content type, got {content_type}"
    );
}

// ── Classification ──────────────────────────────────────────────

#[tokio::test]
async fn delete_with_204_yields_empty_result() {
    let (client, ctx) = client().await;
    client
        .delete_task(&ctx, Uuid::new_v4())
        .await
        .expect("delete should succeed on 204");
}

#[tokio::test]
async fn non_success_status_is_a_structured_failure() {
    let (client, ctx) = client().await;

    let err = client
        .request::<Value>(&ctx, reqwest::Method::GET, "/v1/reports", Default::default())
        .await
        .expect_err("403 must fail");

    match err {
        ApiError::Http {
            status,
            status_text,
        } => {
            assert_eq!(status, 403);
            assert_eq!(status_text, "Forbidden");
        }
        other => panic!("expected structured HTTP failure, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_failure() {
    let (client, ctx) = client().await;

    let err = client
        .request::<Value>(
            &ctx,
            reqwest::Method::GET,
            "/v1/inspections",
            Default::default(),
        )
        .await
        .expect_err("garbage body must fail");

    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    // bind-then-drop gives us a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{addr}")).expect("build client");
    let err = client
        .request::<Value>(
            &RequestContext::Live,
            reqwest::Method::GET,
            "/v1/tasks",
            Default::default(),
        )
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

// ── Status-carrying variant ─────────────────────────────────────

#[tokio::test]
async fn ensure_user_distinguishes_created_from_existing() {
    let (client, ctx) = client().await;

    let payload = |email: &str| NewUser {
        org_id: Uuid::new_v4(),
        email: email.into(),
        role: Role::Manager,
        password: None,
    };

    let (created, user) = client
        .ensure_user(&ctx, &payload("new-hire@example.com"))
        .await
        .expect("ensure new");
    assert!(created);
    assert_eq!(user.email, "new-hire@example.com");

    let (created, _) = client
        .ensure_user(&ctx, &payload("old-hand@example.com"))
        .await
        .expect("ensure existing");
    assert!(!created);
}

// ── Query parameters ────────────────────────────────────────────

#[tokio::test]
async fn collection_filters_travel_as_query_params() {
    let (client, ctx) = client().await;
    let org = Uuid::new_v4();

    let seen: Value = client
        .request(
            &ctx,
            reqwest::Method::GET,
            "/v1/tasks",
            siteproof_client::RequestOptions::default().with_query("orgId", org.to_string()),
        )
        .await
        .expect("filtered dispatch");

    assert_eq!(seen["query"], format!("orgId={org}"));
}
