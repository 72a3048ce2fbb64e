use std::collections::{BTreeMap, HashMap, HashSet};

use domains::{Ingredient, IngredientId, Recipe, RecipeId, Tag, TagId, User, UserId};

use crate::changes::{constraints, PendingChange};
use crate::error::StorageError;

/// Committed rows. Commits are applied to a clone that replaces the
/// committed tables only if every change passes the constraint checks.
#[derive(Debug, Default, Clone)]
pub(super) struct Tables {
    pub(super) recipes: BTreeMap<RecipeId, Recipe>,
    pub(super) ingredients: BTreeMap<IngredientId, Ingredient>,
    pub(super) tags: BTreeMap<TagId, Tag>,
    pub(super) users: HashMap<UserId, User>,
}

impl Tables {
    pub(super) fn apply(&mut self, change: PendingChange) -> Result<(), StorageError> {
        match change {
            PendingChange::AddRecipe(recipe) => {
                if self.recipes.contains_key(&recipe.id()) {
                    return Err(StorageError::unique(constraints::RECIPES_PK));
                }
                self.check_recipe(&recipe)?;
                self.recipes.insert(recipe.id(), recipe);
            }
            PendingChange::UpdateRecipe(mut recipe) => {
                let Some(current) = self.recipes.get(&recipe.id()) else {
                    return Err(StorageError::missing("recipe", recipe.id()));
                };
                let version = current.version() + 1;
                self.check_recipe(&recipe)?;
                recipe.stamp_version(version);
                self.recipes.insert(recipe.id(), recipe);
            }
            PendingChange::RemoveRecipe(id) => {
                if self.recipes.remove(&id).is_none() {
                    return Err(StorageError::missing("recipe", id));
                }
            }
            PendingChange::AddIngredient(ingredient) => {
                if self.ingredients.contains_key(&ingredient.id()) {
                    return Err(StorageError::unique(constraints::INGREDIENTS_PK));
                }
                self.check_ingredient(&ingredient)?;
                self.ingredients.insert(ingredient.id(), ingredient);
            }
            PendingChange::UpdateIngredient(ingredient) => {
                if !self.ingredients.contains_key(&ingredient.id()) {
                    return Err(StorageError::missing("ingredient", ingredient.id()));
                }
                self.check_ingredient(&ingredient)?;
                self.ingredients.insert(ingredient.id(), ingredient);
            }
            PendingChange::AddTag(tag) => {
                if self.tags.contains_key(&tag.id()) {
                    return Err(StorageError::unique(constraints::TAGS_PK));
                }
                if self.tags.values().any(|t| t.slug() == tag.slug()) {
                    return Err(StorageError::unique(constraints::TAGS_SLUG));
                }
                self.tags.insert(tag.id(), tag);
            }
            PendingChange::AddUser(user) => {
                if self.users.contains_key(&user.id()) {
                    return Err(StorageError::unique(constraints::USERS_PK));
                }
                if self.users.values().any(|u| u.name() == user.name()) {
                    return Err(StorageError::unique(constraints::USERS_NAME));
                }
                self.users.insert(user.id(), user);
            }
        }
        Ok(())
    }

    fn check_ingredient(&self, ingredient: &Ingredient) -> Result<(), StorageError> {
        let taken = self
            .ingredients
            .values()
            .any(|i| i.id() != ingredient.id() && i.name() == ingredient.name());
        if taken {
            return Err(StorageError::unique(constraints::INGREDIENTS_NAME));
        }
        Ok(())
    }

    fn check_recipe(&self, recipe: &Recipe) -> Result<(), StorageError> {
        if !self.users.contains_key(&recipe.author_id()) {
            return Err(StorageError::foreign_key(constraints::RECIPES_AUTHOR));
        }
        for other in self.recipes.values().filter(|r| r.id() != recipe.id()) {
            if other.slug() == recipe.slug() {
                return Err(StorageError::unique(constraints::RECIPES_SLUG));
            }
            if other.author_id() == recipe.author_id() && other.title() == recipe.title() {
                return Err(StorageError::unique(constraints::RECIPES_AUTHOR_TITLE));
            }
        }

        let mut step_numbers = HashSet::new();
        if !recipe.steps().iter().all(|s| step_numbers.insert(s.step_number())) {
            return Err(StorageError::unique(constraints::RECIPE_STEPS_NUMBER));
        }

        let mut entries = HashSet::new();
        for entry in recipe.ingredients() {
            if !self.ingredients.contains_key(&entry.ingredient_id()) {
                return Err(StorageError::foreign_key(
                    constraints::RECIPE_INGREDIENTS_INGREDIENT,
                ));
            }
            if !entries.insert((entry.ingredient_id(), entry.unit())) {
                return Err(StorageError::unique(constraints::RECIPE_INGREDIENTS_UNIT));
            }
        }

        if recipe.tags().iter().any(|t| !self.tags.contains_key(&t.tag_id())) {
            return Err(StorageError::foreign_key(constraints::RECIPE_TAGS_TAG));
        }
        Ok(())
    }
}
