/// Password hashing using Argon2id
///
/// Stored credentials are PHC strings produced by Argon2id with a fresh
/// random salt per call, so hashing the same password twice never yields the
/// same string.
///
/// # Defaults
///
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash
///
/// All three cost parameters are configurable through [`HashParams`]. The
/// parameters used for a given hash are embedded in its PHC string, so
/// changing them later does not invalidate existing credentials.
///
/// # Example
///
/// ```
/// use printshop_shared::auth::password::{CredentialHasher, HashParams};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hasher = CredentialHasher::new(HashParams {
///     memory_kib: 1024,
///     iterations: 1,
///     parallelism: 1,
/// })?;
///
/// let hash = hasher.hash("pw1234")?;
/// assert!(hasher.verify("pw1234", &hash));
/// assert!(!hasher.verify("wrong", &hash));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, ParamsBuilder, Version,
};
use std::sync::Arc;
use tracing::warn;

/// Plaintext used to build the decoy hash for unknown accounts
const DECOY_PASSWORD: &str = "printshop-decoy-credential";

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Cost parameters rejected by Argon2
    #[error("Invalid hash parameters: {0}")]
    InvalidParams(String),

    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Hashes and verifies account passwords
///
/// Cheap to clone; the decoy hash used by [`CredentialHasher::verify_decoy`]
/// is computed at construction and shared between clones.
#[derive(Clone)]
pub struct CredentialHasher {
    params: Params,
    decoy: Arc<str>,
}

impl CredentialHasher {
    /// Creates a hasher with the given cost parameters
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::InvalidParams` if Argon2 rejects the
    /// parameters (for example a memory cost below `8 * parallelism`), or
    /// `PasswordError::HashError` if the decoy hash cannot be built.
    pub fn new(params: HashParams) -> Result<Self, PasswordError> {
        let params = ParamsBuilder::new()
            .m_cost(params.memory_kib)
            .t_cost(params.iterations)
            .p_cost(params.parallelism)
            .output_len(32)
            .build()
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone());
        let decoy = hash_with(&argon2, DECOY_PASSWORD)?;

        Ok(Self {
            params,
            decoy: decoy.into(),
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a password into a PHC string
    ///
    /// Example output:
    /// ```text
    /// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::HashError` if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_with(&self.argon2(), password)
    }

    /// Verifies a password against a stored hash
    ///
    /// Returns `false` on mismatch and also when `hash` is not a parseable
    /// Argon2 PHC string (corrupt rows, hashes from another algorithm).
    /// The comparison itself is constant-time inside `argon2`.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password hash is not a valid PHC string");
                return false;
            }
        };

        // Parameters come from the PHC string, not from `self.params`
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                warn!(error = %e, "Stored password hash could not be verified");
                false
            }
        }
    }

    /// Runs a full verification against a decoy hash and discards the result
    ///
    /// Used when no account exists for the submitted email so that the
    /// unknown-account path costs about as much as a wrong password.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify(password, &self.decoy);
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> CredentialHasher {
        CredentialHasher::new(HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("test params are valid")
    }

    #[test]
    fn test_hash_password_format() {
        let hash = test_hasher().hash("test_password_123").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=1024"));
        assert!(hash.contains("t=1"));
        assert!(hash.contains("p=1"));
    }

    #[test]
    fn test_default_params_are_embedded() {
        let hasher = CredentialHasher::new(HashParams::default()).expect("default params");
        let hash = hasher.hash("pw").expect("Hash should succeed");

        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let password = "plaintext-marker";
        let hash = test_hasher().hash(password).expect("Hash should succeed");
        assert!(!hash.contains(password));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hasher = test_hasher();
        let hash1 = hasher.hash("same_password").expect("Hash 1 should succeed");
        let hash2 = hasher.hash("same_password").expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hasher = test_hasher();
        let hash = hasher.hash("correct_password").expect("Hash should succeed");
        assert!(hasher.verify("correct_password", &hash));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hasher = test_hasher();
        let hash = hasher.hash("correct_password").expect("Hash should succeed");
        assert!(!hasher.verify("wrong_password", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let hasher = test_hasher();
        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", "$argon2id$invalid"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_verify_rejects_foreign_hash() {
        // bcrypt, cost 12
        let bcrypt = "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";
        assert!(!test_hasher().verify("password", bcrypt));
    }

    #[test]
    fn test_verify_uses_params_from_hash() {
        let strong = test_hasher();
        let hash = strong.hash("pw1234").expect("Hash should succeed");

        let other = CredentialHasher::new(HashParams {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .expect("params");
        assert!(other.verify("pw1234", &hash));
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let hasher = test_hasher();
        let passwords = [
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-비밀번호-パスワード",
        ];

        for password in passwords {
            let hash = hasher.hash(password).expect("Hash should succeed");
            assert!(hasher.verify(password, &hash), "Password '{}' should verify", password);
            assert!(!hasher.verify(&format!("{}x", password), &hash));
        }
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = CredentialHasher::new(HashParams {
            memory_kib: 1,
            iterations: 1,
            parallelism: 4,
        });
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }

    #[test]
    fn test_decoy_is_ready_after_construction() {
        let hasher = test_hasher();

        assert!(hasher.decoy.starts_with("$argon2id$"));
        assert!(hasher.decoy.contains("m=1024"));
        assert!(PasswordHash::new(&hasher.decoy).is_ok());
        assert!(hasher.verify(DECOY_PASSWORD, &hasher.decoy));
    }

    #[test]
    fn test_verify_decoy_is_shared_between_clones() {
        let hasher = test_hasher();
        let clone = hasher.clone();

        hasher.verify_decoy("anything");
        clone.verify_decoy("anything else");

        assert!(Arc::ptr_eq(&hasher.decoy, &clone.decoy));
    }
}
