use axum::extract::State;
use axum::response::Response;
use axum::Json;
use services::dto::TagSummaryDto;
use services::tags::{CreateTagHandler, ListTagsHandler};
use services::Validate;

use super::created;
use crate::requests::CreateTagRequest;
use crate::web::error::ApiError;
use crate::web::extract::ApiJson;
use crate::web::state::AppState;

pub(crate) async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagSummaryDto>>, ApiError> {
    let session = state.open_session();
    let tags = ListTagsHandler::from_session(session.as_ref()).handle().await?;
    Ok(Json(tags))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateTagRequest>,
) -> Result<Response, ApiError> {
    let command = body.into_command();
    command.validate()?;

    let session = state.open_session();
    let tag = CreateTagHandler::from_session(session.as_ref())
        .handle(command)
        .await?;
    Ok(created(format!("/api/tags/{}", tag.id), tag))
}
