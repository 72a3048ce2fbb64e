//! User use cases.

mod create;
mod list;

pub use create::{CreateUserCommand, CreateUserError, CreateUserHandler};
pub use list::ListUsersHandler;
