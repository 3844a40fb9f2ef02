/// Database migration runner
///
/// Thin wrapper around sqlx's embedded migration system.
///
/// # Migration Files
///
/// Migrations live in the `migrations/` directory at the crate root.
/// Each file is named `{timestamp}_{name}.sql` and is applied exactly
/// once, in timestamp order.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration fails
/// to execute, or the connection is lost mid-run. A failed migration is
/// rolled back.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

// Running migrations requires a live database; the api crate's
// integration setup runs them against the test database.
