//! Storage adapters implementing the `domains::ports` session contract.
//!
//! - [`memory`]: process-local store, always available.
//! - `postgres`: PostgreSQL via `sqlx`, behind the `db-postgres` feature.

mod changes;
pub mod error;
pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use error::StorageError;
pub use memory::{InMemorySession, InMemoryStore};

#[cfg(feature = "db-postgres")]
pub use postgres::{PostgresSession, PostgresStore};
