//! # Entities
//!
//! Each entity validates its invariants in `create` and exposes state through
//! getters; mutation happens only through named methods that keep the
//! invariants and bump `updated_at`. Stores rebuild entities with `restore`,
//! which trusts its input.

mod ingredient;
mod recipe;
mod tag;
mod user;

pub use ingredient::{Ingredient, IngredientParts};
pub use recipe::{Recipe, RecipeContent, RecipeIngredient, RecipeParts, RecipeStep, RecipeTag};
pub use tag::{Tag, TagParts};
pub use user::{User, UserParts};

use crate::errors::{DomainError, DomainResult};

/// Trims `value` and checks it is non-empty and at most `max` characters.
pub(crate) fn required_text(field: &'static str, value: &str, max: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    check_length(field, trimmed, max)?;
    Ok(trimmed.to_owned())
}

/// Trims an optional value; blank input becomes `None`.
pub(crate) fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> DomainResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_length(field, trimmed, max)?;
            Ok(Some(trimmed.to_owned()))
        }
    }
}

/// Trims and lowercases a slug, which must stay non-empty.
pub(crate) fn normalized_slug(value: &str, max: usize) -> DomainResult<String> {
    let slug = value.trim().to_lowercase();
    if slug.is_empty() {
        return Err(DomainError::validation("slug", "must not be empty"));
    }
    check_length("slug", &slug, max)?;
    Ok(slug)
}

fn check_length(field: &'static str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}
