/// Embedded schema migrations
///
/// Migration files live in `migrations/` at the workspace root and are
/// compiled into the binary, so a deployed server can bring an empty
/// database up to date on startup.
///
/// # Example
///
/// ```no_run
/// use printshop_shared::db::migrations::run_migrations;
/// use printshop_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::Migrator, postgres::PgPool};
use tracing::{info, warn};

/// Workspace migrations, embedded at compile time
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Applies every pending migration
///
/// # Errors
///
/// Returns an error if a migration fails or an applied migration was edited
/// after the fact (checksum mismatch).
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(available = MIGRATOR.iter().count(), "Running database migrations");

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_migration_is_embedded() {
        let descriptions: Vec<_> = MIGRATOR.iter().map(|m| m.description.to_string()).collect();
        assert!(descriptions.iter().any(|d| d == "create users"));
    }
}
