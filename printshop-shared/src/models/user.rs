/// User model and database operations
///
/// Storefront customer accounts. Records are created by signup and are never
/// updated or deleted by the service.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id            UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name          VARCHAR(100) NOT NULL,
///     email         CITEXT NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     phone         VARCHAR(32),
///     created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_email_key UNIQUE (email)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use printshop_shared::models::user::{CreateUser, UserRecord};
/// use printshop_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = UserRecord::create(
///     &pool,
///     CreateUser {
///         name: "Kim".to_string(),
///         email: "kim@x.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         phone: None,
///     },
/// )
/// .await?;
///
/// let found = UserRecord::find_by_email(&pool, "kim@x.com").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

/// A stored customer account
///
/// Holds the password hash, so it is deliberately not `Serialize`. Convert to
/// [`UserProfile`] before anything leaves the service.
#[derive(Clone, sqlx::FromRow)]
pub struct UserRecord {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login identifier, unique and case-insensitive (CITEXT)
    pub email: String,

    /// Argon2id PHC string
    pub password_hash: String,

    /// Optional contact number
    pub phone: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("phone", &self.phone)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input for creating a new user
///
/// The email must already be normalized (trimmed, lowercased).
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Normalized email address
    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,

    /// Optional contact number
    pub phone: Option<String>,
}

/// Account data safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserProfile {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}

impl UserRecord {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// `users_email_key`, SQLSTATE 23505) or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email, password_hash, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email::TEXT AS email, password_hash, phone, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.phone)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address (case-insensitive via CITEXT)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email::TEXT AS email, password_hash, phone, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Returns whether an account with this email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            name: "Kim".to_string(),
            email: "kim@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            phone: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_serializes_without_credentials() {
        let profile = UserProfile::from(record());
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["email"], "kim@x.com");
        assert_eq!(json["name"], "Kim");
        assert!(json["phone"].is_null());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn test_record_debug_redacts_hash() {
        let debug = format!("{:?}", record());
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("argon2"));
    }
}
