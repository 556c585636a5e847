//! HTTP-level tests for `/api/solved`, driven through the router with mock sources.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use leetsync_api::{build_router, AppState};
use leetsync_core::testing::{submission, MockHistoryProvider, MockRecentSource};
use leetsync_core::{Aggregator, HistoryProvider};

fn app(recent: MockRecentSource, history: Vec<Arc<dyn HistoryProvider>>) -> Router {
    build_router(Arc::new(AppState::new(Aggregator::new(Arc::new(recent), history))))
}

fn default_app() -> Router {
    app(
        MockRecentSource::returning(vec![
            submission("two-sum", 100),
            submission("two-sum", 300),
            submission("lru-cache", 200),
        ]),
        vec![Arc::new(MockHistoryProvider::returning(
            "graphql-history",
            &["two-sum", "lru-cache", "word-ladder"],
        ))],
    )
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/solved")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(default_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn options_returns_empty_ok() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/solved")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(default_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/solved")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = default_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn non_post_methods_are_rejected() {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let request = Request::builder()
            .method(method.clone())
            .uri("/api/solved")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send_json(default_app(), request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "method {method}");
        assert_eq!(body, json!({"error": "Only POST allowed"}));
    }
}

#[tokio::test]
async fn missing_username_is_bad_request() {
    for body in [json!({}), json!({"username": ""}), json!({"username": null}), json!({"responseFormat": "v2"})] {
        let (status, resp) = send_json(default_app(), post_json(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(resp["error"], "Username is required");
    }
}

#[tokio::test]
async fn empty_and_malformed_bodies_are_missing_username() {
    for raw in ["", "{\"username\":", "null", "[\"alice\"]"] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/solved")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .unwrap();

        let (status, body) = send_json(default_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw:?}");
        assert_eq!(body, json!({"error": "Username is required"}));
    }
}

#[tokio::test]
async fn wrong_typed_flags_fall_back_to_legacy() {
    for body in [
        json!({"username": "alice", "includeFullHistory": "true"}),
        json!({"username": "alice", "responseFormat": 2}),
        json!({"username": "alice", "responseFormat": ["v2"], "includeFullHistory": 1}),
    ] {
        let (status, resp) = send_json(default_app(), post_json(body.clone())).await;
        assert_eq!(status, StatusCode::OK, "body {body}");
        assert!(resp.is_array(), "body {body} gave {resp}");
        assert_eq!(resp.as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn legacy_mode_fetches_recent_once_and_skips_history() {
    let recent = Arc::new(MockRecentSource::returning(vec![submission("a", 1)]));
    let history = Arc::new(MockHistoryProvider::returning("graphql-history", &["a", "b"]));
    let app = build_router(Arc::new(AppState::new(Aggregator::new(
        recent.clone(),
        vec![history.clone()],
    ))));

    let (status, body) = send_json(app, post_json(json!({"username": "alice"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
    assert_eq!(recent.calls(), 1);
    assert_eq!(history.calls(), 0);
}

#[tokio::test]
async fn legacy_mode_returns_bare_array() {
    let (status, body) = send_json(default_app(), post_json(json!({"username": "alice"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"title": "two sum", "titleSlug": "two-sum", "timestamp": 300},
            {"title": "lru cache", "titleSlug": "lru-cache", "timestamp": 200}
        ])
    );
}

#[tokio::test]
async fn v2_mode_returns_aggregated_object() {
    let (status, body) = send_json(
        default_app(),
        post_json(json!({"username": "alice", "responseFormat": "v2"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "full");
    assert_eq!(body["recentSolved"].as_array().unwrap().len(), 2);
    assert_eq!(body["allSolvedSlugs"], json!(["lru-cache", "two-sum", "word-ladder"]));
    assert_eq!(body["counts"], json!({"recentSolved": 2, "allSolved": 3}));
}

#[tokio::test]
async fn include_full_history_opts_into_v2() {
    let (status, body) = send_json(
        default_app(),
        post_json(json!({"username": "alice", "includeFullHistory": true})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_object());
    for key in ["source", "recentSolved", "allSolvedSlugs", "counts"] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
}

#[tokio::test]
async fn falls_back_to_rest_then_recent() {
    let graphql = Arc::new(MockHistoryProvider::failing("graphql-history"));
    let rest = Arc::new(MockHistoryProvider::failing("rest-history"));
    let app = app(
        MockRecentSource::returning(vec![submission("a", 1), submission("a", 5), submission("b", 2)]),
        vec![graphql.clone(), rest.clone()],
    );

    let (status, body) = send_json(app, post_json(json!({"username": "alice", "responseFormat": "v2"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(graphql.calls(), 1);
    assert_eq!(rest.calls(), 1);
    assert_eq!(body["source"], "recent");
    assert_eq!(body["allSolvedSlugs"], json!(["a", "b"]));
    assert_eq!(
        body["recentSolved"],
        json!([
            {"title": "a", "titleSlug": "a", "timestamp": 5},
            {"title": "b", "titleSlug": "b", "timestamp": 2}
        ])
    );
    assert_eq!(body["counts"], json!({"recentSolved": 2, "allSolved": 2}));
}

#[tokio::test]
async fn recent_failure_is_internal_error() {
    let app = app(MockRecentSource::failing(), vec![]);

    let (status, body) = send_json(app, post_json(json!({"username": "alice"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch submissions");
    assert!(body["details"].as_str().unwrap().contains("upstream unavailable"));
}

#[tokio::test]
async fn responses_carry_cors_and_no_store_headers() {
    let mut request = post_json(json!({"username": "alice"}));
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://example.com".parse().unwrap());

    let response = default_app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
}
