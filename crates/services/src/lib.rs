//! # services
//!
//! Application layer of the cookbook. Each use case is a handler that
//! borrows the repositories it needs, validates its command, drives the
//! entities, and commits through the unit of work exactly once on success.
//!
//! Expected business failures are returned as named variants of a
//! per-command error enum; entity or store failures travel in the `Domain`
//! variant.

pub mod dto;
pub mod ingredients;
pub mod recipes;
pub mod slug;
pub mod tags;
pub mod users;
pub mod validation;

pub use validation::{Validate, ValidationErrors};
