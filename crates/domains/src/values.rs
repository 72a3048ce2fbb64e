//! Enumerations shared by entities and DTOs.
//!
//! Both serialize by variant name (`"Gram"`, `"Easy"`) and persist as small
//! integer codes.

use serde::{Deserialize, Serialize};

/// Unit an ingredient amount is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeasurementUnit {
    #[default]
    Unitless,
    Gram,
    Milliliter,
    Tablespoon,
    Teaspoon,
    Cup,
    Piece,
}

impl MeasurementUnit {
    pub const fn code(self) -> i16 {
        match self {
            Self::Unitless => 0,
            Self::Gram => 1,
            Self::Milliliter => 2,
            Self::Tablespoon => 3,
            Self::Teaspoon => 4,
            Self::Cup => 5,
            Self::Piece => 6,
        }
    }

    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Unitless),
            1 => Some(Self::Gram),
            2 => Some(Self::Milliliter),
            3 => Some(Self::Tablespoon),
            4 => Some(Self::Teaspoon),
            5 => Some(Self::Cup),
            6 => Some(Self::Piece),
            _ => None,
        }
    }
}

/// How demanding a recipe is to prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecipeDifficulty {
    #[default]
    Unknown,
    Easy,
    Medium,
    Hard,
}

impl RecipeDifficulty {
    pub const fn code(self) -> i16 {
        match self {
            Self::Unknown => 0,
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Easy),
            2 => Some(Self::Medium),
            3 => Some(Self::Hard),
            _ => None,
        }
    }
}
