//! HTTP inbound adapter exposing the REST surface.

pub mod auth;
pub mod contacts;
pub mod error;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiResult;
