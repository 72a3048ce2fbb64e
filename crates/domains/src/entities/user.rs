use chrono::{DateTime, Utc};

use super::required_text;
use crate::errors::DomainResult;
use crate::ids::UserId;

/// A recipe author.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserParts {
    pub id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub const MAX_NAME_LENGTH: usize = 200;

    /// Creates a user; a nil `id` is replaced by a freshly generated one.
    pub fn create(id: UserId, name: &str) -> DomainResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: if id.is_nil() { UserId::generate() } else { id },
            name: required_text("name", name, Self::MAX_NAME_LENGTH)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(parts: UserParts) -> Self {
        Self {
            id: parts.id,
            name: parts.name,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        }
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.name = required_text("name", name, Self::MAX_NAME_LENGTH)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn nil_id_is_replaced() {
        let user = User::create(UserId::from_uuid(Uuid::nil()), "Ada").unwrap();
        assert!(!user.id().is_nil());
    }

    #[test]
    fn explicit_id_is_kept_and_name_trimmed() {
        let id = UserId::generate();
        let user = User::create(id, "  Ada Lovelace ").unwrap();
        assert_eq!(user.id(), id);
        assert_eq!(user.name(), "Ada Lovelace");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(User::create(UserId::generate(), " \t").is_err());
        let mut user = User::create(UserId::generate(), "Ada").unwrap();
        assert!(user.rename("").is_err());
        assert_eq!(user.name(), "Ada");
    }
}
