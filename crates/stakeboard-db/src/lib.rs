pub mod errors;
pub mod models;
pub mod pool;
pub mod schema;

use deadpool_diesel::postgres::Pool;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub use errors::{DatabaseError, InitError};
pub use pool::{StakeboardPool, init_pool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations. Fails when the database cannot be reached, which
/// makes it the startup connectivity check as well.
pub async fn run_migrations(pool: &Pool) -> Result<(), InitError> {
    let conn = pool
        .get()
        .await
        .map_err(|e| InitError::Connection(e.to_string()))?;

    let applied = conn
        .interact(|conn| {
            conn.run_pending_migrations(MIGRATIONS)
                .map(|versions| versions.len())
                .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| InitError::Migration(e.to_string()))?
        .map_err(InitError::Migration)?;

    tracing::info!(applied, "Database migrations are up to date");
    Ok(())
}
