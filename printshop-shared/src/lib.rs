//! # Printshop Shared Library
//!
//! Domain types and business logic for the print storefront, used by the
//! HTTP server.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, signup and login
//! - `store`: the credential store trait and its PostgreSQL / in-memory implementations
//! - `models`: database models
//! - `db`: connection pool and migrations
//! - `catalog`: product category taxonomy

pub mod auth;
pub mod catalog;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
