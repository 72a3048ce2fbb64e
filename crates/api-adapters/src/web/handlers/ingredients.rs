use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use domains::IngredientId;
use services::dto::IngredientSummaryDto;
use services::ingredients::{
    CreateIngredientHandler, ListIngredientsHandler, RenameIngredientHandler,
};
use services::Validate;

use super::created;
use crate::requests::{CreateIngredientRequest, RenameIngredientRequest};
use crate::web::error::ApiError;
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::state::AppState;

pub(crate) async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<IngredientSummaryDto>>, ApiError> {
    let session = state.open_session();
    let ingredients = ListIngredientsHandler::from_session(session.as_ref()).handle().await?;
    Ok(Json(ingredients))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateIngredientRequest>,
) -> Result<Response, ApiError> {
    let command = body.into_command();
    command.validate()?;

    let session = state.open_session();
    let ingredient = CreateIngredientHandler::from_session(session.as_ref())
        .handle(command)
        .await?;
    Ok(created(format!("/api/ingredients/{}", ingredient.id), ingredient))
}

pub(crate) async fn rename(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<IngredientId>,
    ApiJson(body): ApiJson<RenameIngredientRequest>,
) -> Result<StatusCode, ApiError> {
    let command = body.into_command(id);
    command.validate()?;

    let session = state.open_session();
    RenameIngredientHandler::from_session(session.as_ref())
        .handle(command)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
