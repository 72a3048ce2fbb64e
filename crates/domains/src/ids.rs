//! Strongly typed identifiers.
//!
//! Numeric ids are issued by the store (`next_id` on the repositories) so an
//! entity carries its identity from the moment it is created. Users are keyed
//! by a UUID generated when the user is created.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a [`crate::Recipe`].
    RecipeId
);
numeric_id!(
    /// Identifier of an [`crate::Ingredient`].
    IngredientId
);
numeric_id!(
    /// Identifier of a [`crate::Tag`].
    TagId
);
numeric_id!(
    /// Identifier of one ingredient entry inside a recipe.
    RecipeIngredientId
);
numeric_id!(
    /// Identifier of one step inside a recipe.
    RecipeStepId
);

/// Identifier of a [`crate::User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// The all-zero identifier, treated as "no author supplied".
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&RecipeId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: TagId = serde_json::from_str("12").unwrap();
        assert_eq!(back.value(), 12);
    }

    #[test]
    fn generated_user_ids_are_never_nil() {
        assert!(!UserId::generate().is_nil());
        assert!(UserId::from_uuid(Uuid::nil()).is_nil());
    }
}
