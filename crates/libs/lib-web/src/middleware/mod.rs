//! # Middleware
//!
//! - **[`mw_auth`]**: bearer-token authentication through the identity provider
//! - **[`mw_req_stamp`]**: request id stamping
//! - **[`mw_res_map`]**: uniform JSON error bodies
//! - **[`mw_logging`]**: request/response logging

// region: --- Modules
pub mod mw_auth;
pub mod mw_logging;
pub mod mw_req_stamp;
pub mod mw_res_map;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::require_auth;
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp, REQUEST_ID_HEADER};
pub use mw_res_map::map_res;
// endregion: --- Re-exports
