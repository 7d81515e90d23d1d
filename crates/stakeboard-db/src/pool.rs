use crate::errors::{DatabaseError, InitError};
use deadpool_diesel::postgres::{Manager, Pool, Runtime};

const MAX_POOL_SIZE: usize = 16;

/// Build the Postgres connection pool. Connections are opened lazily, so
/// reachability is only checked by the first interaction.
pub fn init_pool(app_name: &str, database_url: &str) -> Result<Pool, InitError> {
    let manager = Manager::new(database_url, Runtime::Tokio1);
    let pool = Pool::builder(manager)
        .max_size(MAX_POOL_SIZE)
        .build()
        .map_err(|e| InitError::Pool(e.to_string()))?;

    tracing::info!(app_name, max_size = MAX_POOL_SIZE, "Database pool initialized");
    Ok(pool)
}

/// Extension trait for deadpool-diesel Pool to provide cleaner error handling
pub trait StakeboardPool {
    /// Interact with the database with automatic error handling and logging
    ///
    /// # Arguments
    /// * `operation` - A description of the operation for logging context
    /// * `f` - The database operation to perform
    ///
    /// # Example
    /// ```ignore
    /// let stats = pool
    ///     .interact_with_context("fetch latest protocol stats".to_string(), ProtocolStatsRecord::find_all)
    ///     .await?;
    /// ```
    fn interact_with_context<F, T, E>(
        &self,
        operation: String,
        f: F,
    ) -> impl std::future::Future<Output = Result<T, DatabaseError>> + Send
    where
        F: FnOnce(&mut diesel::PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<DatabaseError> + Send + 'static;
}

impl StakeboardPool for Pool {
    async fn interact_with_context<F, T, E>(
        &self,
        operation: String,
        f: F,
    ) -> Result<T, DatabaseError>
    where
        F: FnOnce(&mut diesel::PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<DatabaseError> + Send + 'static,
    {
        let conn = self.get().await.map_err(|e| {
            tracing::error!(
                operation = %operation,
                error = %e,
                "Failed to get database connection from pool"
            );
            DatabaseError::PoolError {
                operation: operation.clone(),
                message: e.to_string(),
            }
        })?;

        conn.interact(f)
            .await
            .map_err(|e| {
                tracing::error!(
                    operation = %operation,
                    error = %e,
                    "Database interaction failed (deadpool error)"
                );
                DatabaseError::InteractionError {
                    operation: operation.clone(),
                    message: e.to_string(),
                }
            })?
            .map_err(|e| {
                let db_error: DatabaseError = e.into();
                let db_error = db_error.with_operation(&operation);
                tracing::error!(
                    operation = %operation,
                    error = %db_error,
                    "Database query failed"
                );
                db_error
            })
    }
}
