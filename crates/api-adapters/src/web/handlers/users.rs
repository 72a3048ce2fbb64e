use axum::extract::State;
use axum::response::Response;
use axum::Json;
use services::dto::UserSummaryDto;
use services::users::{CreateUserHandler, ListUsersHandler};
use services::Validate;

use super::created;
use crate::requests::CreateUserRequest;
use crate::web::error::ApiError;
use crate::web::extract::ApiJson;
use crate::web::state::AppState;

pub(crate) async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummaryDto>>, ApiError> {
    let session = state.open_session();
    let users = ListUsersHandler::from_session(session.as_ref()).handle().await?;
    Ok(Json(users))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateUserRequest>,
) -> Result<Response, ApiError> {
    let command = body.into_command();
    command.validate()?;

    let session = state.open_session();
    let user = CreateUserHandler::from_session(session.as_ref())
        .handle(command)
        .await?;
    Ok(created(format!("/api/users/{}", user.id), user))
}
