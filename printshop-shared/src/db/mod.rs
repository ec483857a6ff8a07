/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool setup and health checks
/// - `migrations`: embedded schema migrations
///
/// Queries themselves live next to their models in `crate::models`.

pub mod migrations;
pub mod pool;
