use domains::ports::{DataSession, TagRepository};
use domains::DomainResult;

use crate::dto::TagSummaryDto;

pub struct ListTagsHandler<'a> {
    tags: &'a dyn TagRepository,
}

impl<'a> ListTagsHandler<'a> {
    pub fn new(tags: &'a dyn TagRepository) -> Self {
        Self { tags }
    }

    pub fn from_session(session: &'a dyn DataSession) -> Self {
        Self::new(session.tags())
    }

    /// All tags ordered by name.
    pub async fn handle(&self) -> DomainResult<Vec<TagSummaryDto>> {
        let tags = self.tags.list().await?;
        Ok(tags.iter().map(TagSummaryDto::from_domain).collect())
    }
}
