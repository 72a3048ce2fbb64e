//! Serializable shapes returned to callers. Field names are camelCase on
//! the wire and enums serialize by variant name.

mod ingredient;
mod recipe;
mod tag;
mod user;

pub use ingredient::IngredientSummaryDto;
pub use recipe::{
    RecipeDetailsDto, RecipeIngredientDto, RecipeStepDto, RecipeSummaryDto, RecipeTagDto,
};
pub use tag::TagSummaryDto;
pub use user::UserSummaryDto;
