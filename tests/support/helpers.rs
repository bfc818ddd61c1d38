// tests/support/helpers.rs
use super::mocks::FixedClock;
use axum::Router;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use dispatch_core::application::ports::{time::Clock, util::SlugGenerator};
use dispatch_core::application::services::ApplicationServices;
use dispatch_core::domain::layout::ComponentRegistry;
use dispatch_core::infrastructure::{
    repositories::memory::InMemoryStore,
    theme::{DEFAULT_THEME, registry_from_json},
    util::DefaultSlugGenerator,
};
use dispatch_core::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt as _;

/// Router over a fresh in-memory store with the bundled theme.
pub fn make_test_router() -> Router {
    router_for(&InMemoryStore::new(), DEFAULT_THEME)
}

/// Router over `store` with the given theme; several routers may share one store.
pub fn router_for(store: &InMemoryStore, theme_json: &str) -> Router {
    let registry = registry_from_json(theme_json).expect("test theme is valid");
    build_test_router(store, registry)
}

pub fn build_test_router(store: &InMemoryStore, registry: ComponentRegistry) -> Router {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let services = Arc::new(ApplicationServices::new(
        Arc::new(registry),
        store.repositories(),
        clock,
        slugger,
    ));
    build_router(HttpState { services }, &[])
}

pub async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    }
}

/// Send a request with an optional JSON body and return status plus parsed body.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");
    let resp = app.clone().oneshot(req).await.expect("response");
    let status = resp.status();
    (status, read_json(resp).await)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send_json(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send_json(app, Method::POST, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send_json(app, Method::DELETE, uri, None).await
}

/// POST a form-encoded body, the way the page editor submits components.
pub async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request");
    let resp = app.clone().oneshot(req).await.expect("response");
    let status = resp.status();
    (status, read_json(resp).await)
}

/// Assert an ErrorResponse body with the expected status and `error` string.
pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, expected_error: &str) {
    assert_eq!(status, expected, "unexpected status, body: {body}");
    assert_eq!(body["error"], expected_error, "unexpected error field: {body}");
    let message = body["message"].as_str().unwrap_or_default();
    assert!(!message.is_empty(), "expected non-empty message field in ErrorResponse");
}
