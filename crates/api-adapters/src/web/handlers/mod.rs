pub(crate) mod ingredients;
pub(crate) mod recipes;
pub(crate) mod system;
pub(crate) mod tags;
pub(crate) mod users;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// `201 Created` with a `Location` header and the created resource.
pub(crate) fn created<T: Serialize>(location: String, body: T) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}
