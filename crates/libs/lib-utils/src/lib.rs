//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, and input validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, get_env_parse_or};
pub use time::now_utc;
pub use validation::{MIN_PASSWORD_LENGTH, validate_not_empty, validate_email, validate_min_length, validate_max_length, validate_range};
