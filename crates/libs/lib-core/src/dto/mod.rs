//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies for the REST API.
//!
//! Every request body implements [`Validate`], which checks the wire shape
//! field by field and converts it into the matching `*ForCreate` /
//! `*ForUpdate` store input. Handlers never hand an unvalidated body to the
//! [`RecordStore`](crate::RecordStore).
//!
//! ## Wire Format
//!
//! Field names are **camelCase** in JSON, enum values are **snake_case**.

pub mod ai;
pub mod auth;
pub mod records;

pub use ai::*;
pub use auth::*;
pub use records::*;

use crate::error::ValidationError;

/// Schema check that turns a request body into store input.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidationError>;
}

/// Attach the wire field name to a `lib_utils::validation` message.
pub(crate) fn check(field: &str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|message| ValidationError::new(field, message))
}

/// Trim an optional string, mapping blank to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
