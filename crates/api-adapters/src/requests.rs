//! JSON request bodies and their mapping onto service commands.

use domains::{IngredientId, MeasurementUnit, RecipeDifficulty, RecipeId, TagId, UserId};
use rust_decimal::Decimal;
use serde::Deserialize;
use services::ingredients::{CreateIngredientCommand, RenameIngredientCommand};
use services::recipes::{AddIngredientToRecipeCommand, AddTagToRecipeCommand, CreateRecipeCommand};
use services::tags::CreateTagCommand;
use services::users::CreateUserCommand;

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIngredientRequest {
    pub name: String,
    #[serde(default)]
    pub plural_name: Option<String>,
    #[serde(default)]
    pub default_unit: Option<MeasurementUnit>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl CreateIngredientRequest {
    pub fn into_command(self) -> CreateIngredientCommand {
        CreateIngredientCommand {
            name: self.name,
            plural_name: self.plural_name,
            default_unit: self.default_unit,
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameIngredientRequest {
    pub name: String,
    #[serde(default)]
    pub plural_name: Option<String>,
}

impl RenameIngredientRequest {
    pub fn into_command(self, id: IngredientId) -> RenameIngredientCommand {
        RenameIngredientCommand {
            id,
            name: self.name,
            plural_name: self.plural_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub author_id: UserId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prep_time_minutes: i32,
    #[serde(default)]
    pub cook_time_minutes: i32,
    pub servings: i32,
    #[serde(default)]
    pub difficulty: RecipeDifficulty,
    #[serde(default)]
    pub is_published: bool,
}

impl CreateRecipeRequest {
    pub fn into_command(self) -> CreateRecipeCommand {
        CreateRecipeCommand {
            author_id: self.author_id,
            title: self.title,
            description: self.description,
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            servings: self.servings,
            difficulty: self.difficulty,
            is_published: self.is_published,
        }
    }
}

/// `amount` accepts a JSON number or a decimal string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIngredientToRecipeRequest {
    pub ingredient_id: IngredientId,
    pub amount: Decimal,
    pub unit: MeasurementUnit,
    #[serde(default)]
    pub note: Option<String>,
}

impl AddIngredientToRecipeRequest {
    pub fn into_command(self, recipe_id: RecipeId) -> AddIngredientToRecipeCommand {
        AddIngredientToRecipeCommand {
            recipe_id,
            ingredient_id: self.ingredient_id,
            amount: self.amount,
            unit: self.unit,
            note: self.note,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTagToRecipeRequest {
    pub tag_id: TagId,
}

impl AddTagToRecipeRequest {
    pub fn into_command(self, recipe_id: RecipeId) -> AddTagToRecipeCommand {
        AddTagToRecipeCommand {
            recipe_id,
            tag_id: self.tag_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
}

impl CreateUserRequest {
    pub fn into_command(self) -> CreateUserCommand {
        CreateUserCommand { name: self.name }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl CreateTagRequest {
    pub fn into_command(self) -> CreateTagCommand {
        CreateTagCommand {
            name: self.name,
            slug: self.slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn ingredients_are_active_unless_stated_otherwise() {
        let body: CreateIngredientRequest = serde_json::from_str(r#"{"name":"Onion"}"#).unwrap();
        assert!(body.is_active);
        let body: CreateIngredientRequest = serde_json::from_str(
            r#"{"name":"Onion","isActive":false,"defaultUnit":"Piece"}"#,
        )
        .unwrap();
        let command = body.into_command();
        assert!(!command.is_active);
        assert_eq!(command.default_unit, Some(MeasurementUnit::Piece));
    }

    #[test]
    fn amounts_parse_from_numbers_and_strings() {
        let from_number: AddIngredientToRecipeRequest =
            serde_json::from_str(r#"{"ingredientId":3,"amount":200.005,"unit":"Gram"}"#).unwrap();
        let from_string: AddIngredientToRecipeRequest =
            serde_json::from_str(r#"{"ingredientId":3,"amount":"200.005","unit":"Gram"}"#).unwrap();
        let expected = Decimal::from_str("200.005").unwrap();
        assert_eq!(from_number.amount, expected);
        assert_eq!(from_string.amount, expected);

        let command = from_number.into_command(RecipeId::new(9));
        assert_eq!(command.recipe_id, RecipeId::new(9));
        assert_eq!(command.ingredient_id, IngredientId::new(3));
    }

    #[test]
    fn recipe_request_defaults_optional_fields() {
        let body: CreateRecipeRequest = serde_json::from_str(
            r#"{"authorId":"7d8f1c5e-8d4b-4c5e-9a55-0b6f7c1d2e3f","title":"Chili","servings":4}"#,
        )
        .unwrap();
        let command = body.into_command();
        assert_eq!(command.difficulty, RecipeDifficulty::Unknown);
        assert_eq!(command.prep_time_minutes, 0);
        assert!(!command.is_published);
        assert!(command.description.is_none());
    }
}
