/// HTTP middleware
///
/// - `security`: hardening response headers

pub mod security;
