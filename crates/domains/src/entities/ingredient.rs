use chrono::{DateTime, Utc};

use super::check_length;
use crate::errors::{DomainError, DomainResult};
use crate::ids::IngredientId;
use crate::values::MeasurementUnit;

/// A reusable ingredient. Names are stored trimmed and lowercased, so
/// "Onion" and " onion " are the same ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    id: IngredientId,
    name: String,
    plural_name: Option<String>,
    default_unit: Option<MeasurementUnit>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Persisted state of an [`Ingredient`], used by stores to rebuild it.
#[derive(Debug, Clone)]
pub struct IngredientParts {
    pub id: IngredientId,
    pub name: String,
    pub plural_name: Option<String>,
    pub default_unit: Option<MeasurementUnit>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ingredient {
    pub const MAX_NAME_LENGTH: usize = 150;

    /// The canonical form used for storage and uniqueness checks.
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Lowercasing can lengthen a name, so limits apply to the normalized form.
    pub fn fits_name_limit(name: &str) -> bool {
        Self::normalize_name(name).chars().count() <= Self::MAX_NAME_LENGTH
    }

    pub fn create(
        id: IngredientId,
        name: &str,
        plural_name: Option<&str>,
        default_unit: Option<MeasurementUnit>,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id,
            name: Self::checked_name(name)?,
            plural_name: Self::checked_plural(plural_name)?,
            default_unit,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(parts: IngredientParts) -> Self {
        Self {
            id: parts.id,
            name: parts.name,
            plural_name: parts.plural_name,
            default_unit: parts.default_unit,
            is_active: parts.is_active,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        }
    }

    pub fn rename(&mut self, name: &str, plural_name: Option<&str>) -> DomainResult<()> {
        let name = Self::checked_name(name)?;
        let plural_name = Self::checked_plural(plural_name)?;
        self.name = name;
        self.plural_name = plural_name;
        self.touch();
        Ok(())
    }

    pub fn set_default_unit(&mut self, unit: Option<MeasurementUnit>) {
        if self.default_unit != unit {
            self.default_unit = unit;
            self.touch();
        }
    }

    /// Activates or deactivates the ingredient; a no-op when unchanged.
    pub fn set_status(&mut self, is_active: bool) {
        if self.is_active != is_active {
            self.is_active = is_active;
            self.touch();
        }
    }

    pub fn id(&self) -> IngredientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plural_name(&self) -> Option<&str> {
        self.plural_name.as_deref()
    }

    pub fn default_unit(&self) -> Option<MeasurementUnit> {
        self.default_unit
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn checked_name(name: &str) -> DomainResult<String> {
        let name = Self::normalize_name(name);
        if name.is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        check_length("name", &name, Self::MAX_NAME_LENGTH)?;
        Ok(name)
    }

    fn checked_plural(plural_name: Option<&str>) -> DomainResult<Option<String>> {
        match plural_name.map(Self::normalize_name) {
            Some(plural) if !plural.is_empty() => {
                check_length("pluralName", &plural, Self::MAX_NAME_LENGTH)?;
                Ok(Some(plural))
            }
            _ => Ok(None),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
