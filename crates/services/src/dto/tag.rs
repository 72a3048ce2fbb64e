use domains::{Tag, TagId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSummaryDto {
    pub id: TagId,
    pub name: String,
    pub slug: String,
}

impl TagSummaryDto {
    pub fn from_domain(tag: &Tag) -> Self {
        Self {
            id: tag.id(),
            name: tag.name().to_owned(),
            slug: tag.slug().to_owned(),
        }
    }
}
