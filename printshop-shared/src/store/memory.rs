use super::{StoreError, UserStore};
use crate::models::user::{CreateUser, UserRecord};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local account store
///
/// Keyed by normalized email. The uniqueness check and the insert happen
/// under one write lock, which gives the same guarantee as the database
/// constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.users.read().await.contains_key(email))
    }

    async fn insert(&self, data: CreateUser) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&data.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = UserRecord {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            phone: data.phone,
            created_at: Utc::now(),
        };
        users.insert(user.email.clone(), user.clone());

        Ok(user)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
