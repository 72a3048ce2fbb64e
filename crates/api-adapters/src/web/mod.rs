//! # axum router
//!
//! ```text
//! /api/ingredients                 GET, POST
//! /api/ingredients/{id}/name       PUT
//! /api/recipes                     GET, POST
//! /api/recipes/{id}                GET, DELETE
//! /api/recipes/{id}/ingredients    POST
//! /api/recipes/{id}/tags           POST
//! /api/recipes/{id}/tags/{tagId}   DELETE
//! /api/users                       GET, POST
//! /api/tags                        GET, POST
//! /health                          GET
//! /metrics                         GET
//! ```

mod error;
mod extract;
mod handlers;
mod middleware;
mod state;

use axum::extract::Request;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

use handlers::{ingredients, recipes, system, tags, users};

/// Builds the application router with CORS for `allowed_origins`.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/api/ingredients", get(ingredients::list).post(ingredients::create))
        .route("/api/ingredients/{id}/name", put(ingredients::rename))
        .route("/api/recipes", get(recipes::list).post(recipes::create))
        .route("/api/recipes/{id}", get(recipes::get).delete(recipes::delete))
        .route("/api/recipes/{id}/ingredients", post(recipes::add_ingredient))
        .route("/api/recipes/{id}/tags", post(recipes::add_tag))
        .route(
            "/api/recipes/{id}/tags/{tag_id}",
            axum::routing::delete(recipes::remove_tag),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/tags", get(tags::list).post(tags::create))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::track_metrics,
        ));

    Router::new()
        .merge(api)
        .route("/health", get(system::health))
        .route("/metrics", get(system::metrics))
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id,
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .expose_headers([LOCATION])
}
