use super::{StoreError, UserStore};
use crate::db::pool;
use crate::models::user::{CreateUser, UserRecord};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed account store
///
/// Every call borrows one connection from the pool for the duration of the
/// query; `sqlx` returns it to the pool when the call completes or fails.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(UserRecord::find_by_email(&self.pool, email).await?)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(UserRecord::email_exists(&self.pool, email).await?)
    }

    async fn insert(&self, data: CreateUser) -> Result<UserRecord, StoreError> {
        UserRecord::create(&self.pool, data).await.map_err(|err| {
            if is_unique_violation(&err) {
                debug!("Insert rejected by users_email_key");
                StoreError::DuplicateEmail
            } else {
                StoreError::Database(err)
            }
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(pool::health_check(&self.pool).await?)
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == UNIQUE_VIOLATION),
        _ => false,
    }
}
