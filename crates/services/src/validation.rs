//! # Request validation
//!
//! Shape checks that run before a command reaches its handler: required
//! fields, length limits and numeric ranges, built on `validator`'s length
//! and range checks. The checks do not depend on a web framework; the HTTP
//! layer turns a failure into a 400 response listing the offending fields.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validator::{ValidateLength, ValidateRange};

/// Field name → messages, in field order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.fields.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }

    /// Fails if the trimmed value is empty.
    pub fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        if !value.trim().validate_length(Some(1), None, None) {
            self.add(field, "is required");
        }
        self
    }

    pub fn max_length(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        max: usize,
    ) -> &mut Self {
        if value.is_some_and(|v| !v.validate_length(None, Some(max as u64), None)) {
            self.add(field, format!("must be at most {max} characters"));
        }
        self
    }

    /// Inclusive on both ends.
    pub fn range<T>(&mut self, field: &'static str, value: T, min: T, max: T) -> &mut Self
    where
        T: ValidateRange<T> + fmt::Display + Copy,
    {
        if !value.validate_range(Some(min), Some(max), None, None) {
            self.add(field, format!("must be between {min} and {max}"));
        }
        self
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request validation failed")?;
        for (i, (field, messages)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{field} {}", messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Implemented by every command that accepts caller input.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}
