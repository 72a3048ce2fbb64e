//! # ApiError
//!
//! Every failure leaves the API as an `application/problem+json` document:
//! `{"title", "status", "detail"?, "errors"?}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::DomainError;
use serde::Serialize;
use services::ingredients::{CreateIngredientError, RenameIngredientError};
use services::recipes::{
    AddIngredientToRecipeError, AddTagToRecipeError, CreateRecipeError, DeleteRecipeError,
    RemoveTagFromRecipeError,
};
use services::tags::CreateTagError;
use services::users::CreateUserError;
use services::ValidationErrors;
use thiserror::Error;

const PROBLEM_JSON: &str = "application/problem+json";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(DomainError),
}

#[derive(Debug, Serialize)]
struct Problem {
    title: &'static str,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationErrors>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_problem(self) -> Problem {
        let status = self.status();
        let title = status.canonical_reason().unwrap_or("Error");
        match self {
            Self::Validation(errors) => Problem {
                title: "One or more validation errors occurred.",
                status: status.as_u16(),
                detail: None,
                errors: Some(errors),
            },
            // Store internals stay in the log.
            Self::Internal(_) => Problem {
                title,
                status: status.as_u16(),
                detail: None,
                errors: None,
            },
            Self::BadRequest(detail) | Self::NotFound(detail) | Self::Conflict(detail) => Problem {
                title,
                status: status.as_u16(),
                detail: Some(detail),
                errors: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(err) = &self {
            tracing::error!(error = %err, "request failed");
        }
        (
            status,
            [(header::CONTENT_TYPE, PROBLEM_JSON)],
            Json(self.into_problem()),
        )
            .into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Conflict(message) => Self::Conflict(message),
            DomainError::NotFound { .. } => Self::NotFound(err.to_string()),
            other => Self::Internal(other),
        }
    }
}

impl From<CreateIngredientError> for ApiError {
    fn from(err: CreateIngredientError) -> Self {
        match err {
            CreateIngredientError::InvalidName => Self::BadRequest(err.to_string()),
            CreateIngredientError::NameAlreadyExists(_) => Self::Conflict(err.to_string()),
            CreateIngredientError::Domain(inner) => inner.into(),
        }
    }
}

impl From<RenameIngredientError> for ApiError {
    fn from(err: RenameIngredientError) -> Self {
        match err {
            RenameIngredientError::InvalidName => Self::BadRequest(err.to_string()),
            RenameIngredientError::NotFound(_) => Self::NotFound(err.to_string()),
            RenameIngredientError::NameAlreadyExists(_) => Self::Conflict(err.to_string()),
            RenameIngredientError::Domain(inner) => inner.into(),
        }
    }
}

impl From<CreateRecipeError> for ApiError {
    fn from(err: CreateRecipeError) -> Self {
        match err {
            CreateRecipeError::InvalidAuthor
            | CreateRecipeError::InvalidTitle
            | CreateRecipeError::InvalidServings
            | CreateRecipeError::InvalidTiming => Self::BadRequest(err.to_string()),
            CreateRecipeError::Domain(inner) => inner.into(),
        }
    }
}

impl From<AddIngredientToRecipeError> for ApiError {
    fn from(err: AddIngredientToRecipeError) -> Self {
        match err {
            AddIngredientToRecipeError::RecipeNotFound(_)
            | AddIngredientToRecipeError::IngredientNotFound(_) => Self::NotFound(err.to_string()),
            AddIngredientToRecipeError::IngredientAlreadyAssigned { .. } => {
                Self::Conflict(err.to_string())
            }
            AddIngredientToRecipeError::Domain(inner) => inner.into(),
        }
    }
}

impl From<AddTagToRecipeError> for ApiError {
    fn from(err: AddTagToRecipeError) -> Self {
        match err {
            AddTagToRecipeError::RecipeNotFound(_) | AddTagToRecipeError::TagNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            AddTagToRecipeError::TagAlreadyAssigned(_) => Self::Conflict(err.to_string()),
            AddTagToRecipeError::Domain(inner) => inner.into(),
        }
    }
}

impl From<RemoveTagFromRecipeError> for ApiError {
    fn from(err: RemoveTagFromRecipeError) -> Self {
        match err {
            RemoveTagFromRecipeError::RecipeNotFound(_)
            | RemoveTagFromRecipeError::TagNotFound(_) => Self::NotFound(err.to_string()),
            RemoveTagFromRecipeError::TagNotAssigned(_) => Self::Conflict(err.to_string()),
            RemoveTagFromRecipeError::Domain(inner) => inner.into(),
        }
    }
}

impl From<DeleteRecipeError> for ApiError {
    fn from(err: DeleteRecipeError) -> Self {
        match err {
            DeleteRecipeError::NotFound(_) => Self::NotFound(err.to_string()),
            DeleteRecipeError::Domain(inner) => inner.into(),
        }
    }
}

impl From<CreateUserError> for ApiError {
    fn from(err: CreateUserError) -> Self {
        match err {
            CreateUserError::InvalidName => Self::BadRequest(err.to_string()),
            CreateUserError::NameAlreadyExists(_) => Self::Conflict(err.to_string()),
            CreateUserError::Domain(inner) => inner.into(),
        }
    }
}

impl From<CreateTagError> for ApiError {
    fn from(err: CreateTagError) -> Self {
        match err {
            CreateTagError::InvalidName | CreateTagError::InvalidSlug => {
                Self::BadRequest(err.to_string())
            }
            CreateTagError::SlugAlreadyExists(_) => Self::Conflict(err.to_string()),
            CreateTagError::Domain(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{RecipeId, TagId};

    #[test]
    fn business_outcomes_map_to_statuses() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (CreateIngredientError::InvalidName.into(), StatusCode::BAD_REQUEST),
            (
                CreateIngredientError::NameAlreadyExists("onion".into()).into(),
                StatusCode::CONFLICT,
            ),
            (
                RemoveTagFromRecipeError::TagNotAssigned(TagId::new(1)).into(),
                StatusCode::CONFLICT,
            ),
            (
                DeleteRecipeError::NotFound(RecipeId::new(5)).into(),
                StatusCode::NOT_FOUND,
            ),
            (CreateRecipeError::InvalidServings.into(), StatusCode::BAD_REQUEST),
        ];
        for (error, status) in cases {
            assert_eq!(error.status(), status, "{error}");
        }
    }

    #[test]
    fn domain_errors_map_by_kind() {
        let conflict: ApiError = DomainError::Conflict("ux_recipes_slug".into()).into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        let missing: ApiError = DomainError::not_found("recipe", 3).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let storage: ApiError = DomainError::Storage("pool timed out".into()).into();
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let invariant: ApiError = DomainError::out_of_range("amount", "must be positive").into();
        assert_eq!(invariant.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let problem =
            ApiError::Internal(DomainError::Storage("password=hunter2".into())).into_problem();
        assert_eq!(problem.status, 500);
        assert!(problem.detail.is_none());
    }
}
