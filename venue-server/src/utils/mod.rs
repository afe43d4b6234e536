//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResponse`] - application error and response types
//! - [`AppResult`] - handler result alias
//! - logging, time and validation helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse};
pub use error::{ok, ok_with_message};
pub use result::AppResult;
pub use time::now_millis;
