//! Recipe use cases.

mod add_ingredient;
mod add_tag;
mod create;
mod delete;
mod get;
mod list;
mod remove_tag;

pub use add_ingredient::{
    AddIngredientToRecipeCommand, AddIngredientToRecipeError, AddIngredientToRecipeHandler,
};
pub use add_tag::{AddTagToRecipeCommand, AddTagToRecipeError, AddTagToRecipeHandler};
pub use create::{CreateRecipeCommand, CreateRecipeError, CreateRecipeHandler};
pub use delete::{DeleteRecipeError, DeleteRecipeHandler};
pub use get::GetRecipeByIdHandler;
pub use list::ListRecipesHandler;
pub use remove_tag::{
    RemoveTagFromRecipeCommand, RemoveTagFromRecipeError, RemoveTagFromRecipeHandler,
};
