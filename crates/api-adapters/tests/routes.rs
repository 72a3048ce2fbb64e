use std::sync::Arc;

use api_adapters::web::{router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use storage_adapters::InMemoryStore;
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(Arc::new(InMemoryStore::new()));
    router(state, &["http://localhost:3000".to_owned()])
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok_with_a_request_id() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn invalid_bodies_become_problem_documents() {
    let response = app()
        .oneshot(post_json("/api/users", json!({ "name": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );
    let problem = body_json(response).await;
    assert_eq!(problem["status"], 400);
    assert!(problem["errors"]["name"].is_array());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let request = Request::post("/api/tags")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let problem = body_json(response).await;
    assert_eq!(problem["title"], "Bad Request");
    assert!(problem["detail"].is_string());
}

#[tokio::test]
async fn unknown_recipe_is_not_found() {
    let response = app()
        .oneshot(Request::get("/api/recipes/404").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["detail"], "recipe 404 not found");
}

#[tokio::test]
async fn non_numeric_ids_become_problem_documents() {
    let requests = [
        Request::get("/api/recipes/chili").body(Body::empty()).unwrap(),
        Request::delete("/api/recipes/1/tags/spicy")
            .body(Body::empty())
            .unwrap(),
    ];
    for request in requests {
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
        let problem = body_json(response).await;
        assert_eq!(problem["status"], 400);
        assert!(problem["detail"].is_string());
    }
}

#[tokio::test]
async fn metrics_count_requests_by_route_template() {
    let app = app();
    app.clone()
        .oneshot(Request::get("/api/recipes/7").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let response = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains(r#"route="/api/recipes/{id}",status="404""#));
}

#[tokio::test]
async fn cors_allows_the_configured_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/recipes")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}
