use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use domains::{RecipeId, TagId};
use services::dto::{RecipeDetailsDto, RecipeSummaryDto};
use services::recipes::{
    AddIngredientToRecipeHandler, AddTagToRecipeHandler, CreateRecipeHandler, DeleteRecipeHandler,
    GetRecipeByIdHandler, ListRecipesHandler, RemoveTagFromRecipeCommand,
    RemoveTagFromRecipeHandler,
};
use services::Validate;

use super::created;
use crate::requests::{AddIngredientToRecipeRequest, AddTagToRecipeRequest, CreateRecipeRequest};
use crate::web::error::ApiError;
use crate::web::extract::{ApiJson, ApiPath};
use crate::web::state::AppState;

fn location(id: RecipeId) -> String {
    format!("/api/recipes/{id}")
}

pub(crate) async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeSummaryDto>>, ApiError> {
    let session = state.open_session();
    let recipes = ListRecipesHandler::from_session(session.as_ref()).handle().await?;
    Ok(Json(recipes))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateRecipeRequest>,
) -> Result<Response, ApiError> {
    let command = body.into_command();
    command.validate()?;

    let session = state.open_session();
    let recipe = CreateRecipeHandler::from_session(session.as_ref())
        .handle(command)
        .await?;
    Ok(created(location(recipe.id), recipe))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<RecipeId>,
) -> Result<Json<RecipeDetailsDto>, ApiError> {
    let session = state.open_session();
    GetRecipeByIdHandler::from_session(session.as_ref())
        .handle(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("recipe {id} not found")))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<RecipeId>,
) -> Result<StatusCode, ApiError> {
    let session = state.open_session();
    DeleteRecipeHandler::from_session(session.as_ref())
        .handle(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn add_ingredient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<RecipeId>,
    ApiJson(body): ApiJson<AddIngredientToRecipeRequest>,
) -> Result<Response, ApiError> {
    let command = body.into_command(id);
    command.validate()?;

    let session = state.open_session();
    let entry = AddIngredientToRecipeHandler::from_session(session.as_ref())
        .handle(command)
        .await?;
    Ok(created(format!("{}/ingredients/{}", location(id), entry.id), entry))
}

pub(crate) async fn add_tag(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<RecipeId>,
    ApiJson(body): ApiJson<AddTagToRecipeRequest>,
) -> Result<StatusCode, ApiError> {
    let command = body.into_command(id);
    command.validate()?;

    let session = state.open_session();
    AddTagToRecipeHandler::from_session(session.as_ref())
        .handle(command)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn remove_tag(
    State(state): State<AppState>,
    ApiPath((id, tag_id)): ApiPath<(RecipeId, TagId)>,
) -> Result<StatusCode, ApiError> {
    let session = state.open_session();
    RemoveTagFromRecipeHandler::from_session(session.as_ref())
        .handle(RemoveTagFromRecipeCommand {
            recipe_id: id,
            tag_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
