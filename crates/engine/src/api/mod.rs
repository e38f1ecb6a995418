//! HTTP layer: routes, caller identity, CORS and error mapping.

pub mod cors;
pub mod error;
pub mod http;
pub mod session;

pub use error::ApiError;
