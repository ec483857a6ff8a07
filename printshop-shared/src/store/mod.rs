/// Credential store
///
/// The account handlers never reach the database directly; they receive an
/// `Arc<dyn UserStore>` so that tests can swap in [`InMemoryUserStore`] or a
/// deliberately failing store.
///
/// # Implementations
///
/// - [`PgUserStore`]: PostgreSQL via a pooled `sqlx` connection
/// - [`InMemoryUserStore`]: process-local map, used by tests and local demos
///
/// Both enforce email uniqueness inside `insert` itself and report a clash
/// as [`StoreError::DuplicateEmail`], so a caller that lost a race after an
/// `email_exists` pre-check still gets a conflict rather than a second row.

mod memory;
mod postgres;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

use crate::models::user::{CreateUser, UserRecord};
use async_trait::async_trait;

/// Error type for credential store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another account already uses this email
    #[error("Email already registered")]
    DuplicateEmail,

    /// Database or connection failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store could not serve the request for another reason
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent storage for customer accounts
///
/// Emails passed in are expected to be normalized already.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a single account by email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Returns whether an account with this email exists
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Inserts a new account, failing with `DuplicateEmail` on a clash
    async fn insert(&self, data: CreateUser) -> Result<UserRecord, StoreError>;

    /// Checks that the store is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}
