//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **security**: Argon2id password hashing
//! - **quotes**: ZenQuotes HTTP client
//! - **identity**: session lookups against the user service
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub(crate) mod http_support;
pub mod identity;
pub mod persistence;
pub mod quotes;
pub mod security;
