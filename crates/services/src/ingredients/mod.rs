//! Ingredient use cases.

mod create;
mod list;
mod rename;

pub use create::{CreateIngredientCommand, CreateIngredientError, CreateIngredientHandler};
pub use list::ListIngredientsHandler;
pub use rename::{RenameIngredientCommand, RenameIngredientError, RenameIngredientHandler};
