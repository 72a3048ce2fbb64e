//! # StorageError
//!
//! Failures raised while reading or committing, converted into
//! [`DomainError`] at the port boundary.

use domains::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// A uniqueness constraint rejected the commit.
    #[error("unique constraint '{constraint}' violated")]
    UniqueViolation { constraint: String },

    /// A row references something that does not exist (or is still referenced).
    #[error("reference constraint '{constraint}' violated")]
    ForeignKeyViolation { constraint: String },

    /// An update or removal targeted a row that is gone.
    #[error("{entity} {id} does not exist")]
    Missing { entity: &'static str, id: String },

    /// A stored value cannot be mapped back onto the domain model.
    #[error("corrupt row in '{table}': {reason}")]
    CorruptRow { table: &'static str, reason: String },

    #[cfg(feature = "db-postgres")]
    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[cfg(feature = "db-postgres")]
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StorageError {
    pub(crate) fn unique(constraint: &str) -> Self {
        Self::UniqueViolation {
            constraint: constraint.to_owned(),
        }
    }

    pub(crate) fn foreign_key(constraint: &str) -> Self {
        Self::ForeignKeyViolation {
            constraint: constraint.to_owned(),
        }
    }

    pub(crate) fn missing(entity: &'static str, id: impl ToString) -> Self {
        Self::Missing {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn corrupt(table: &'static str, reason: impl Into<String>) -> Self {
        Self::CorruptRow {
            table,
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "db-postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            let constraint = db.constraint().unwrap_or("unknown");
            if db.is_unique_violation() {
                return Self::unique(constraint);
            }
            if db.is_foreign_key_violation() {
                return Self::foreign_key(constraint);
            }
        }
        Self::Database(err)
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation { .. } | StorageError::ForeignKeyViolation { .. } => {
                DomainError::Conflict(err.to_string())
            }
            StorageError::Missing { entity, id } => DomainError::NotFound { entity, id },
            other => DomainError::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violations_become_conflicts() {
        let err: DomainError = StorageError::unique("ux_recipes_slug").into();
        assert!(matches!(err, DomainError::Conflict(ref m) if m.contains("ux_recipes_slug")));

        let err: DomainError = StorageError::foreign_key("fk_recipes_author").into();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn missing_rows_become_not_found() {
        let err: DomainError = StorageError::missing("recipe", 4).into();
        assert_eq!(err, DomainError::not_found("recipe", 4));
    }

    #[test]
    fn corrupt_rows_are_storage_failures() {
        let err: DomainError = StorageError::corrupt("recipes", "servings out of range").into();
        assert!(matches!(err, DomainError::Storage(_)));
    }
}
