/// Database models
///
/// # Models
///
/// - `user`: Customer accounts, the create/lookup queries, and the
///   client-facing [`user::UserProfile`]

pub mod user;
