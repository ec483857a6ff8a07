/// Account registration and authentication
///
/// [`AuthService`] owns the two credential operations exposed by the
/// storefront:
///
/// - [`AuthService::register`]: validate, reject duplicates, hash, persist
/// - [`AuthService::authenticate`]: validate, look up, verify, sanitize
///
/// Every store call and every hashing call is bounded by the service
/// timeout. Hashing runs on the blocking pool so it never stalls the async
/// workers.
///
/// # Example
///
/// ```
/// use printshop_shared::auth::password::{CredentialHasher, HashParams};
/// use printshop_shared::auth::service::{AuthService, LoginRequest, SignupRequest};
/// use printshop_shared::store::InMemoryUserStore;
/// use std::{sync::Arc, time::Duration};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hasher = CredentialHasher::new(HashParams { memory_kib: 1024, iterations: 1, parallelism: 1 })?;
/// let service = AuthService::new(Arc::new(InMemoryUserStore::new()), hasher, Duration::from_secs(5));
///
/// let signup = SignupRequest {
///     name: Some("Kim".into()),
///     email: Some("kim@x.com".into()),
///     password: Some("pw1234".into()),
///     phone: None,
/// };
/// let created = service.register(signup).await?;
///
/// let login = LoginRequest { email: Some("kim@x.com".into()), password: Some("pw1234".into()) };
/// let profile = service.authenticate(login).await?;
/// assert_eq!(profile.id, created.id);
/// # Ok(())
/// # }
/// ```

use crate::auth::password::{CredentialHasher, PasswordError};
use crate::models::user::{CreateUser, UserProfile};
use crate::store::{StoreError, UserStore};
use serde::Deserialize;
use std::{future::Future, sync::Arc, time::Duration};
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};
use validator::{Validate, ValidationErrors};

/// Message shared by every failed login, whatever the cause
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error type for account operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Required input missing or malformed
    #[error("Validation failed: {} errors", .0.len())]
    Validation(Vec<FieldError>),

    /// Email already registered
    #[error("Email already registered")]
    Conflict,

    /// Unknown email or wrong password; the two are never distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// A store or hashing call exceeded the service timeout
    #[error("Operation timed out: {0}")]
    Timeout(&'static str),

    /// Store, hashing or runtime failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AuthError::Conflict,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AuthError::Validation(fields)
    }
}

/// Signup request body
///
/// Fields are optional at the type level so that an absent field reaches
/// validation and is reported like an empty one.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 100, message = "Name must be 1-100 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
}

impl SignupRequest {
    fn normalized(self) -> Self {
        Self {
            name: self.name.map(|n| n.trim().to_string()),
            email: self.email.map(|e| normalize_email(&e)),
            password: self.password,
            phone: self
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        }
    }
}

/// Login request body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "Email is required"),
        length(min = 1, message = "Email is required")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

/// Trims and lowercases an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registration and authentication over an injected store
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    timeout: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, hasher: CredentialHasher, timeout: Duration) -> Self {
        Self {
            store,
            hasher,
            timeout,
        }
    }

    /// Creates a new account and returns its public profile
    ///
    /// # Errors
    ///
    /// - `Validation`: name, email or password missing/empty, bad email format
    /// - `Conflict`: email already registered, including a lost race on insert
    /// - `Timeout` / `Internal`: store or hashing failure
    #[instrument(skip_all)]
    pub async fn register(&self, req: SignupRequest) -> Result<UserProfile, AuthError> {
        let req = req.normalized();
        req.validate()?;

        let (Some(name), Some(email), Some(password)) = (req.name, req.email, req.password) else {
            error!("Validated signup is missing a field");
            return Err(AuthError::Internal("validated signup missing a field".to_string()));
        };

        // Fast path; the store's uniqueness guarantee in `insert` is authoritative
        if self.bounded("email_exists", self.store.email_exists(&email)).await? {
            warn!(email = %email, "Signup rejected: email already registered");
            return Err(AuthError::Conflict);
        }

        let hasher = self.hasher.clone();
        let password_hash = self
            .blocking("hash_password", move || hasher.hash(&password))
            .await?
            .inspect_err(|e| error!(error = %e, "Password hashing failed"))?;

        let user = self
            .bounded(
                "insert_user",
                self.store.insert(CreateUser {
                    name,
                    email,
                    password_hash,
                    phone: req.phone,
                }),
            )
            .await
            .inspect_err(|e| {
                if matches!(e, AuthError::Conflict) {
                    warn!("Signup lost duplicate-email race on insert");
                }
            })?;

        info!(user_id = %user.id, "User registered");
        Ok(UserProfile::from(user))
    }

    /// Verifies credentials and returns the matching public profile
    ///
    /// An unknown email and a wrong password both yield
    /// `AuthError::InvalidCredentials`, and both pay for one Argon2
    /// verification.
    ///
    /// # Errors
    ///
    /// - `Validation`: email or password missing/empty
    /// - `InvalidCredentials`: no such account or wrong password
    /// - `Timeout` / `Internal`: store or hashing failure
    #[instrument(skip_all)]
    pub async fn authenticate(&self, req: LoginRequest) -> Result<UserProfile, AuthError> {
        let req = LoginRequest {
            email: req.email.map(|e| normalize_email(&e)),
            password: req.password,
        };
        req.validate()?;

        let (Some(email), Some(password)) = (req.email, req.password) else {
            error!("Validated login is missing a field");
            return Err(AuthError::Internal("validated login missing a field".to_string()));
        };

        let user = self
            .bounded("find_by_email", self.store.find_by_email(&email))
            .await?;

        let hasher = self.hasher.clone();
        let Some(user) = user else {
            self.blocking("verify_password", move || hasher.verify_decoy(&password))
                .await?;
            warn!(email = %email, "Login failed: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.clone();
        let valid = self
            .blocking("verify_password", move || hasher.verify(&password, &stored_hash))
            .await?;

        if !valid {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User logged in");
        Ok(UserProfile::from(user))
    }

    /// Runs a store call under the service timeout
    ///
    /// Failures are logged here, once; callers only map them.
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AuthError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(|e| {
                if !matches!(e, StoreError::DuplicateEmail) {
                    error!(operation, error = %e, "Credential store call failed");
                }
                AuthError::from(e)
            }),
            Err(_) => {
                error!(operation, timeout = ?self.timeout, "Credential store call timed out");
                Err(AuthError::Timeout(operation))
            }
        }
    }

    /// Runs CPU-bound work on the blocking pool under the service timeout
    async fn blocking<T, F>(&self, operation: &'static str, work: F) -> Result<T, AuthError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        match timeout(self.timeout, tokio::task::spawn_blocking(work)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(join_err)) => {
                error!(operation, error = %join_err, "Blocking task failed");
                Err(AuthError::Internal(format!("{} task failed: {}", operation, join_err)))
            }
            Err(_) => {
                error!(operation, timeout = ?self.timeout, "Blocking task timed out");
                Err(AuthError::Timeout(operation))
            }
        }
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("hasher", &self.hasher)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
