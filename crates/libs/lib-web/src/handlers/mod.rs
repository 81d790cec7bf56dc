//! # HTTP Handlers
//!
//! Request handlers grouped by entity. Bodies go through
//! [`ValidatedJson`](crate::extract::ValidatedJson) before any handler runs,
//! and every failure is an [`AppError`](lib_core::AppError).
//!
//! ## Modules
//!
//! - **[`users`]**: user records
//! - **[`doctors`]**: doctors and clinics
//! - **[`appointments`]**: booking and partial updates
//! - **[`telemedicine`]**: video sessions and stored chat messages
//! - **[`news`]**: medical news feed
//! - **[`ai`]**: AI assistant and saved transcripts
//! - **[`auth`]**: signup, login and profile

pub mod ai;
pub mod appointments;
pub mod auth;
pub mod doctors;
pub mod news;
pub mod telemedicine;
pub mod users;

#[cfg(test)]
pub(crate) mod tests;
