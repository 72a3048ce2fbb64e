//! # Recipe aggregate
//!
//! A recipe owns its steps, ingredient entries and tag entries; they are
//! persisted and removed together with it.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use super::{normalized_slug, optional_text, required_text};
use crate::errors::{DomainError, DomainResult};
use crate::ids::{IngredientId, RecipeId, RecipeIngredientId, RecipeStepId, TagId, UserId};
use crate::values::{MeasurementUnit, RecipeDifficulty};

/// The user-editable details of a recipe, shared by `create` and
/// `update_details`.
#[derive(Debug, Clone, Copy)]
pub struct RecipeContent<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub prep_time_minutes: i32,
    pub cook_time_minutes: i32,
    pub servings: u8,
    pub difficulty: RecipeDifficulty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    id: RecipeId,
    author_id: UserId,
    slug: String,
    title: String,
    description: Option<String>,
    prep_time_minutes: i32,
    cook_time_minutes: i32,
    servings: u8,
    difficulty: RecipeDifficulty,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
    steps: Vec<RecipeStep>,
    ingredients: Vec<RecipeIngredient>,
    tags: Vec<RecipeTag>,
}

/// Persisted state of a [`Recipe`] and its owned collections.
#[derive(Debug, Clone)]
pub struct RecipeParts {
    pub id: RecipeId,
    pub author_id: UserId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub prep_time_minutes: i32,
    pub cook_time_minutes: i32,
    pub servings: u8,
    pub difficulty: RecipeDifficulty,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
    pub steps: Vec<RecipeStep>,
    pub ingredients: Vec<RecipeIngredient>,
    pub tags: Vec<RecipeTag>,
}

struct CheckedContent {
    title: String,
    description: Option<String>,
    prep_time_minutes: i32,
    cook_time_minutes: i32,
    servings: u8,
    difficulty: RecipeDifficulty,
}

impl CheckedContent {
    fn check(content: RecipeContent<'_>) -> DomainResult<Self> {
        let title = required_text("title", content.title, Recipe::MAX_TITLE_LENGTH)?;
        let description = optional_text(
            "description",
            content.description,
            Recipe::MAX_DESCRIPTION_LENGTH,
        )?;
        if content.prep_time_minutes < 0 {
            return Err(DomainError::out_of_range("prepTimeMinutes", "must not be negative"));
        }
        if content.cook_time_minutes < 0 {
            return Err(DomainError::out_of_range("cookTimeMinutes", "must not be negative"));
        }
        if content.servings == 0 {
            return Err(DomainError::out_of_range("servings", "must be greater than zero"));
        }
        Ok(Self {
            title,
            description,
            prep_time_minutes: content.prep_time_minutes,
            cook_time_minutes: content.cook_time_minutes,
            servings: content.servings,
            difficulty: content.difficulty,
        })
    }
}

impl Recipe {
    pub const MAX_TITLE_LENGTH: usize = 200;
    pub const MAX_DESCRIPTION_LENGTH: usize = 2000;
    pub const MAX_SLUG_LENGTH: usize = 128;

    /// Creates an unpublished recipe with no steps, ingredients or tags.
    pub fn create(
        id: RecipeId,
        author_id: UserId,
        slug: &str,
        content: RecipeContent<'_>,
    ) -> DomainResult<Self> {
        if author_id.is_nil() {
            return Err(DomainError::validation("authorId", "must not be empty"));
        }
        let slug = normalized_slug(slug, Self::MAX_SLUG_LENGTH)?;
        let content = CheckedContent::check(content)?;
        let now = Utc::now();
        Ok(Self {
            id,
            author_id,
            slug,
            title: content.title,
            description: content.description,
            prep_time_minutes: content.prep_time_minutes,
            cook_time_minutes: content.cook_time_minutes,
            servings: content.servings,
            difficulty: content.difficulty,
            is_published: false,
            created_at: now,
            updated_at: now,
            version: 0,
            steps: Vec::new(),
            ingredients: Vec::new(),
            tags: Vec::new(),
        })
    }

    pub fn restore(parts: RecipeParts) -> Self {
        Self {
            id: parts.id,
            author_id: parts.author_id,
            slug: parts.slug,
            title: parts.title,
            description: parts.description,
            prep_time_minutes: parts.prep_time_minutes,
            cook_time_minutes: parts.cook_time_minutes,
            servings: parts.servings,
            difficulty: parts.difficulty,
            is_published: parts.is_published,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
            version: parts.version,
            steps: parts.steps,
            ingredients: parts.ingredients,
            tags: parts.tags,
        }
    }

    /// Replaces the editable details. Nothing changes if any field is invalid.
    pub fn update_details(&mut self, content: RecipeContent<'_>) -> DomainResult<()> {
        let content = CheckedContent::check(content)?;
        self.title = content.title;
        self.description = content.description;
        self.prep_time_minutes = content.prep_time_minutes;
        self.cook_time_minutes = content.cook_time_minutes;
        self.servings = content.servings;
        self.difficulty = content.difficulty;
        self.touch();
        Ok(())
    }

    pub fn set_slug(&mut self, slug: &str) -> DomainResult<()> {
        self.slug = normalized_slug(slug, Self::MAX_SLUG_LENGTH)?;
        self.touch();
        Ok(())
    }

    pub fn publish(&mut self) {
        if !self.is_published {
            self.is_published = true;
            self.touch();
        }
    }

    pub fn unpublish(&mut self) {
        if self.is_published {
            self.is_published = false;
            self.touch();
        }
    }

    /// Appends a step. Step numbers are unique within a recipe.
    pub fn add_step(
        &mut self,
        id: RecipeStepId,
        step_number: i32,
        instruction: &str,
        duration_minutes: Option<i32>,
        media_url: Option<&str>,
    ) -> DomainResult<&RecipeStep> {
        if self.steps.iter().any(|s| s.step_number == step_number) {
            return Err(DomainError::DuplicateStep { step_number });
        }
        let step = RecipeStep::create(id, step_number, instruction, duration_minutes, media_url)?;
        self.steps.push(step);
        self.touch();
        Ok(&self.steps[self.steps.len() - 1])
    }

    /// Removes the step with this number; returns whether one was removed.
    pub fn remove_step(&mut self, step_number: i32) -> bool {
        let before = self.steps.len();
        self.steps.retain(|s| s.step_number != step_number);
        let removed = self.steps.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Appends an ingredient entry. Callers check [`Recipe::has_ingredient`]
    /// first; the store rejects duplicate (ingredient, unit) pairs on commit.
    pub fn add_ingredient(
        &mut self,
        id: RecipeIngredientId,
        ingredient_id: IngredientId,
        amount: Decimal,
        unit: MeasurementUnit,
        note: Option<&str>,
    ) -> DomainResult<&RecipeIngredient> {
        let entry = RecipeIngredient::create(id, ingredient_id, amount, unit, note)?;
        self.ingredients.push(entry);
        self.touch();
        Ok(&self.ingredients[self.ingredients.len() - 1])
    }

    pub fn has_ingredient(&self, ingredient_id: IngredientId, unit: MeasurementUnit) -> bool {
        self.ingredients
            .iter()
            .any(|e| e.ingredient_id == ingredient_id && e.unit == unit)
    }

    pub fn remove_ingredient(&mut self, entry_id: RecipeIngredientId) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|e| e.id != entry_id);
        let removed = self.ingredients.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Adds a tag; returns `false` (and changes nothing) if already present.
    pub fn add_tag(&mut self, tag_id: TagId) -> bool {
        if self.has_tag(tag_id) {
            return false;
        }
        self.tags.push(RecipeTag::new(tag_id));
        self.touch();
        true
    }

    pub fn has_tag(&self, tag_id: TagId) -> bool {
        self.tags.iter().any(|t| t.tag_id == tag_id)
    }

    /// Removes a tag; returns `false` if it was not assigned.
    pub fn remove_tag(&mut self, tag_id: TagId) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.tag_id != tag_id);
        let removed = self.tags.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Records the row version assigned by the store on commit.
    pub fn stamp_version(&mut self, version: i64) {
        self.version = version;
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn prep_time_minutes(&self) -> i32 {
        self.prep_time_minutes
    }

    pub fn cook_time_minutes(&self) -> i32 {
        self.cook_time_minutes
    }

    pub fn servings(&self) -> u8 {
        self.servings
    }

    pub fn difficulty(&self) -> RecipeDifficulty {
        self.difficulty
    }

    pub fn is_published(&self) -> bool {
        self.is_published
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn steps(&self) -> &[RecipeStep] {
        &self.steps
    }

    pub fn ingredients(&self) -> &[RecipeIngredient] {
        &self.ingredients
    }

    pub fn tags(&self) -> &[RecipeTag] {
        &self.tags
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// One numbered instruction of a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeStep {
    id: RecipeStepId,
    step_number: i32,
    instruction: String,
    duration_minutes: Option<i32>,
    media_url: Option<String>,
}

impl RecipeStep {
    pub const MAX_INSTRUCTION_LENGTH: usize = 2000;
    pub const MAX_MEDIA_URL_LENGTH: usize = 500;

    pub fn create(
        id: RecipeStepId,
        step_number: i32,
        instruction: &str,
        duration_minutes: Option<i32>,
        media_url: Option<&str>,
    ) -> DomainResult<Self> {
        if step_number <= 0 {
            return Err(DomainError::out_of_range("stepNumber", "must be greater than zero"));
        }
        let mut step = Self {
            id,
            step_number,
            instruction: String::new(),
            duration_minutes: None,
            media_url: None,
        };
        step.update(instruction, duration_minutes, media_url)?;
        Ok(step)
    }

    pub fn restore(
        id: RecipeStepId,
        step_number: i32,
        instruction: String,
        duration_minutes: Option<i32>,
        media_url: Option<String>,
    ) -> Self {
        Self {
            id,
            step_number,
            instruction,
            duration_minutes,
            media_url,
        }
    }

    pub fn update(
        &mut self,
        instruction: &str,
        duration_minutes: Option<i32>,
        media_url: Option<&str>,
    ) -> DomainResult<()> {
        let instruction = required_text("instruction", instruction, Self::MAX_INSTRUCTION_LENGTH)?;
        if matches!(duration_minutes, Some(d) if d < 0) {
            return Err(DomainError::out_of_range("durationMinutes", "must not be negative"));
        }
        let media_url = optional_text("mediaUrl", media_url, Self::MAX_MEDIA_URL_LENGTH)?;
        self.instruction = instruction;
        self.duration_minutes = duration_minutes;
        self.media_url = media_url;
        Ok(())
    }

    pub fn id(&self) -> RecipeStepId {
        self.id
    }

    pub fn step_number(&self) -> i32 {
        self.step_number
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn duration_minutes(&self) -> Option<i32> {
        self.duration_minutes
    }

    pub fn media_url(&self) -> Option<&str> {
        self.media_url.as_deref()
    }
}

/// An ingredient used by a recipe, with an amount in a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredient {
    id: RecipeIngredientId,
    ingredient_id: IngredientId,
    amount: Decimal,
    unit: MeasurementUnit,
    note: Option<String>,
}

impl RecipeIngredient {
    pub const MAX_NOTE_LENGTH: usize = 200;

    pub fn create(
        id: RecipeIngredientId,
        ingredient_id: IngredientId,
        amount: Decimal,
        unit: MeasurementUnit,
        note: Option<&str>,
    ) -> DomainResult<Self> {
        let mut entry = Self {
            id,
            ingredient_id,
            amount: Decimal::ZERO,
            unit,
            note: None,
        };
        entry.update(amount, unit, note)?;
        Ok(entry)
    }

    pub fn restore(
        id: RecipeIngredientId,
        ingredient_id: IngredientId,
        amount: Decimal,
        unit: MeasurementUnit,
        note: Option<String>,
    ) -> Self {
        Self {
            id,
            ingredient_id,
            amount,
            unit,
            note,
        }
    }

    /// Amounts are kept to two decimals, rounding halves away from zero.
    pub fn round_amount(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn update(
        &mut self,
        amount: Decimal,
        unit: MeasurementUnit,
        note: Option<&str>,
    ) -> DomainResult<()> {
        let amount = Self::round_amount(amount);
        if amount <= Decimal::ZERO {
            return Err(DomainError::out_of_range("amount", "must be greater than zero"));
        }
        let note = optional_text("note", note, Self::MAX_NOTE_LENGTH)?;
        self.amount = amount;
        self.unit = unit;
        self.note = note;
        Ok(())
    }

    pub fn id(&self) -> RecipeIngredientId {
        self.id
    }

    pub fn ingredient_id(&self) -> IngredientId {
        self.ingredient_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn unit(&self) -> MeasurementUnit {
        self.unit
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Assignment of a tag to a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeTag {
    tag_id: TagId,
}

impl RecipeTag {
    pub fn new(tag_id: TagId) -> Self {
        Self { tag_id }
    }

    pub fn tag_id(&self) -> TagId {
        self.tag_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn content(title: &str) -> RecipeContent<'_> {
        RecipeContent {
            title,
            description: Some("  Hearty  "),
            prep_time_minutes: 15,
            cook_time_minutes: 60,
            servings: 4,
            difficulty: RecipeDifficulty::Medium,
        }
    }

    fn chili() -> Recipe {
        Recipe::create(RecipeId::new(1), UserId::generate(), " Chili-ABC ", content(" Chili "))
            .unwrap()
    }

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn create_normalizes_fields() {
        let recipe = chili();
        assert_eq!(recipe.slug(), "chili-abc");
        assert_eq!(recipe.title(), "Chili");
        assert_eq!(recipe.description(), Some("Hearty"));
        assert!(!recipe.is_published());
        assert!(recipe.steps().is_empty());
        assert!(recipe.ingredients().is_empty());
        assert!(recipe.tags().is_empty());
    }

    #[test]
    fn create_enforces_invariants() {
        let author = UserId::generate();
        let nil = UserId::from_uuid(uuid::Uuid::nil());
        assert!(Recipe::create(RecipeId::new(1), nil, "s", content("Chili")).is_err());
        assert!(Recipe::create(RecipeId::new(1), author, "  ", content("Chili")).is_err());
        assert!(Recipe::create(RecipeId::new(1), author, "s", content("   ")).is_err());

        let long_title = "t".repeat(Recipe::MAX_TITLE_LENGTH + 1);
        assert!(Recipe::create(RecipeId::new(1), author, "s", content(&long_title)).is_err());

        let zero_servings = RecipeContent {
            servings: 0,
            ..content("Chili")
        };
        assert!(matches!(
            Recipe::create(RecipeId::new(1), author, "s", zero_servings),
            Err(DomainError::OutOfRange { field: "servings", .. })
        ));

        let negative_prep = RecipeContent {
            prep_time_minutes: -1,
            ..content("Chili")
        };
        assert!(Recipe::create(RecipeId::new(1), author, "s", negative_prep).is_err());
    }

    #[test]
    fn publish_and_unpublish_are_idempotent() {
        let mut recipe = chili();
        recipe.publish();
        let stamp = recipe.updated_at();
        recipe.publish();
        assert!(recipe.is_published());
        assert_eq!(recipe.updated_at(), stamp);
        recipe.unpublish();
        recipe.unpublish();
        assert!(!recipe.is_published());
    }

    #[test]
    fn update_details_is_all_or_nothing() {
        let mut recipe = chili();
        let invalid = RecipeContent {
            cook_time_minutes: -5,
            ..content("Stew")
        };
        assert!(recipe.update_details(invalid).is_err());
        assert_eq!(recipe.title(), "Chili");

        recipe
            .update_details(RecipeContent {
                description: None,
                ..content("Stew")
            })
            .unwrap();
        assert_eq!(recipe.title(), "Stew");
        assert_eq!(recipe.description(), None);
    }

    #[test]
    fn duplicate_step_numbers_are_rejected() {
        let mut recipe = chili();
        recipe
            .add_step(RecipeStepId::new(1), 1, "Chop onions", Some(5), None)
            .unwrap();
        let err = recipe
            .add_step(RecipeStepId::new(2), 1, "Brown meat", None, None)
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateStep { step_number: 1 });
        assert_eq!(recipe.steps().len(), 1);

        assert!(recipe.remove_step(1));
        assert!(!recipe.remove_step(1));
    }

    #[test]
    fn step_validation() {
        assert!(RecipeStep::create(RecipeStepId::new(1), 0, "x", None, None).is_err());
        assert!(RecipeStep::create(RecipeStepId::new(1), 1, "  ", None, None).is_err());
        assert!(RecipeStep::create(RecipeStepId::new(1), 1, "x", Some(-1), None).is_err());
        let step = RecipeStep::create(
            RecipeStepId::new(1),
            2,
            " Simmer ",
            Some(30),
            Some(" https://example.com/a.jpg "),
        )
        .unwrap();
        assert_eq!(step.instruction(), "Simmer");
        assert_eq!(step.media_url(), Some("https://example.com/a.jpg"));
    }

    #[test]
    fn ingredient_amounts_round_half_away_from_zero() {
        assert_eq!(RecipeIngredient::round_amount(dec("200.005")), dec("200.01"));
        assert_eq!(RecipeIngredient::round_amount(dec("1.004")), dec("1.00"));
        assert_eq!(RecipeIngredient::round_amount(dec("0.125")), dec("0.13"));
    }

    #[test]
    fn add_ingredient_validates_amount_and_note() {
        let mut recipe = chili();
        let onion = IngredientId::new(3);
        assert!(matches!(
            recipe.add_ingredient(
                RecipeIngredientId::new(1),
                onion,
                Decimal::ZERO,
                MeasurementUnit::Gram,
                None,
            ),
            Err(DomainError::OutOfRange { field: "amount", .. })
        ));
        let long_note = "n".repeat(RecipeIngredient::MAX_NOTE_LENGTH + 1);
        assert!(recipe
            .add_ingredient(
                RecipeIngredientId::new(1),
                onion,
                dec("1"),
                MeasurementUnit::Gram,
                Some(&long_note),
            )
            .is_err());
        assert!(recipe.ingredients().is_empty());

        let entry = recipe
            .add_ingredient(
                RecipeIngredientId::new(1),
                onion,
                dec("200.005"),
                MeasurementUnit::Gram,
                Some(" diced "),
            )
            .unwrap();
        assert_eq!(entry.amount(), dec("200.01"));
        assert_eq!(entry.note(), Some("diced"));
        assert!(recipe.has_ingredient(onion, MeasurementUnit::Gram));
        assert!(!recipe.has_ingredient(onion, MeasurementUnit::Piece));

        assert!(recipe.remove_ingredient(RecipeIngredientId::new(1)));
        assert!(recipe.ingredients().is_empty());
    }

    #[test]
    fn tags_are_a_set() {
        let mut recipe = chili();
        let tag = TagId::new(9);
        assert!(recipe.add_tag(tag));
        assert!(!recipe.add_tag(tag));
        assert_eq!(recipe.tags().len(), 1);
        assert!(recipe.remove_tag(tag));
        assert!(!recipe.remove_tag(tag));
        assert!(recipe.tags().is_empty());
    }
}
