//! Changes staged by the repositories of one session until the unit of
//! work commits them.

use domains::{Ingredient, Recipe, RecipeId, Tag, User};
use parking_lot::Mutex;

#[derive(Debug, Clone)]
pub(crate) enum PendingChange {
    AddRecipe(Recipe),
    UpdateRecipe(Recipe),
    RemoveRecipe(RecipeId),
    AddIngredient(Ingredient),
    UpdateIngredient(Ingredient),
    AddTag(Tag),
    AddUser(User),
}

#[derive(Debug, Default)]
pub(crate) struct ChangeSet {
    pending: Mutex<Vec<PendingChange>>,
}

impl ChangeSet {
    pub(crate) fn stage(&self, change: PendingChange) {
        self.pending.lock().push(change);
    }

    /// Drains everything staged so far, in staging order.
    pub(crate) fn take(&self) -> Vec<PendingChange> {
        std::mem::take(&mut *self.pending.lock())
    }
}

/// Names shared by the in-memory constraint checks and the SQL schema.
pub(crate) mod constraints {
    pub const INGREDIENTS_PK: &str = "pk_ingredients";
    pub const INGREDIENTS_NAME: &str = "ux_ingredients_name";
    pub const RECIPES_PK: &str = "pk_recipes";
    pub const RECIPES_SLUG: &str = "ux_recipes_slug";
    pub const RECIPES_AUTHOR_TITLE: &str = "ux_recipes_author_title";
    pub const RECIPES_AUTHOR: &str = "fk_recipes_author";
    pub const RECIPE_STEPS_NUMBER: &str = "ux_recipe_steps_number";
    pub const RECIPE_INGREDIENTS_UNIT: &str = "ux_recipe_ingredients_unit";
    pub const RECIPE_INGREDIENTS_INGREDIENT: &str = "fk_recipe_ingredients_ingredient";
    pub const RECIPE_TAGS_TAG: &str = "fk_recipe_tags_tag";
    pub const TAGS_PK: &str = "pk_tags";
    pub const TAGS_SLUG: &str = "ux_tags_slug";
    pub const USERS_PK: &str = "pk_users";
    pub const USERS_NAME: &str = "ux_users_name";
}
