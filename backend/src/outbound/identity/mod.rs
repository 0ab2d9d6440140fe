//! Identity resolution against the user service.

mod dto;
mod user_service_client;

pub use user_service_client::UserServiceIdentityResolver;
