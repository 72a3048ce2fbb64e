use domains::ports::{DataSession, UserRepository};
use domains::DomainResult;

use crate::dto::UserSummaryDto;

pub struct ListUsersHandler<'a> {
    users: &'a dyn UserRepository,
}

impl<'a> ListUsersHandler<'a> {
    pub fn new(users: &'a dyn UserRepository) -> Self {
        Self { users }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.users())
    }

    /// All users ordered by name.
    pub async fn handle(&self) -> DomainResult<Vec<UserSummaryDto>> {
        let users = self.users.list().await?;
        Ok(users.iter().map(UserSummaryDto::from_domain).collect())
    }
}
