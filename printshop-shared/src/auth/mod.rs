/// Account authentication
///
/// # Modules
///
/// - [`password`]: Argon2id hashing and verification
/// - [`service`]: signup and login over an injected [`crate::store::UserStore`]
///
/// No sessions or tokens are issued; a successful login returns the
/// account's public profile.

pub mod password;
pub mod service;
