use domains::{Ingredient, IngredientId, MeasurementUnit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSummaryDto {
    pub id: IngredientId,
    pub name: String,
    pub plural_name: Option<String>,
    pub default_unit: Option<MeasurementUnit>,
    pub is_active: bool,
}

impl IngredientSummaryDto {
    pub fn from_domain(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id(),
            name: ingredient.name().to_owned(),
            plural_name: ingredient.plural_name().map(str::to_owned),
            default_unit: ingredient.default_unit(),
            is_active: ingredient.is_active(),
        }
    }
}
