//! Tag use cases.

mod create;
mod list;

pub use create::{CreateTagCommand, CreateTagError, CreateTagHandler};
pub use list::ListTagsHandler;
