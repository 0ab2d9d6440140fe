//! HTTP inbound adapter exposing REST endpoints for both services.

pub mod error;
pub mod habits;
pub mod health;
pub mod identity;
pub mod motivation;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::{ApiResult, json_config};
