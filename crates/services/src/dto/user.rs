use chrono::{DateTime, Utc};
use domains::{User, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub id: UserId,
    pub name: String,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

impl UserSummaryDto {
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_owned(),
            created_at_utc: user.created_at(),
            updated_at_utc: user.updated_at(),
        }
    }
}
