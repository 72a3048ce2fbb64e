//! # domains
//!
//! Core model of the cookbook: entities with their invariants, identifier
//! types, enumerations, and the ports (repository and unit-of-work traits)
//! that the services layer drives and the storage adapters implement.
//!
//! Nothing in this crate performs I/O.

pub mod entities;
pub mod errors;
pub mod ids;
pub mod ports;
pub mod values;

pub use entities::{
    Ingredient, IngredientParts, Recipe, RecipeContent, RecipeIngredient, RecipeParts, RecipeStep,
    RecipeTag, Tag, TagParts, User, UserParts,
};
pub use errors::{DomainError, DomainResult};
pub use ids::{IngredientId, RecipeId, RecipeIngredientId, RecipeStepId, TagId, UserId};
pub use values::{MeasurementUnit, RecipeDifficulty};
