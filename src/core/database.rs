use crate::core::config::DatabaseConfig;
use crate::core::error::{AppError, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tokio::sync::OnceCell;

pub async fn create_pool(config: &DatabaseConfig) -> std::result::Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Process-wide, lazily created connection pool.
///
/// `connect` is idempotent: the first successful call creates the pool and
/// every later call returns it. Concurrent first calls initialize once. A
/// failed attempt leaves the connector empty so the next call tries again.
/// The connector is shared behind an `Arc`; `PgPool` is internally synchronized.
pub struct DatabaseConnector {
    config: DatabaseConfig,
    pool: OnceCell<PgPool>,
}

impl DatabaseConnector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    pub async fn connect(&self) -> Result<&PgPool> {
        self.pool
            .get_or_try_init(|| async {
                tracing::info!(
                    "Connecting to database at {}",
                    self.config.redacted_url()
                );
                let pool = create_pool(&self.config)
                    .await
                    .map_err(AppError::Connection)?;
                tracing::info!("Database connection pool created");
                Ok::<_, AppError>(pool)
            })
            .await
    }

    /// Pool of an already connected connector
    pub fn pool(&self) -> Result<&PgPool> {
        self.pool.get().ok_or(AppError::NotConnected)
    }

    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    pub fn query_timeout(&self) -> Duration {
        self.config.query_timeout()
    }

    /// Round trip to the store, used by the readiness check
    pub async fn ping(&self) -> Result<()> {
        let pool = self.connect().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            tracing::info!("Database connection pool closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> DatabaseConfig {
        DatabaseConfig {
            // Port 1 is reserved and nothing listens there
            url: "postgres://shop:pw@127.0.0.1:1/storefront".to_string(),
            max_connections: 2,
            min_connections: 0,
            acquire_timeout_secs: 1,
            idle_timeout_secs: 60,
            max_lifetime_secs: 60,
            query_timeout_secs: 1,
        }
    }

    #[test]
    fn test_pool_before_connect_is_not_connected() {
        let connector = DatabaseConnector::new(unreachable_config());

        assert!(!connector.is_connected());
        assert!(matches!(connector.pool(), Err(AppError::NotConnected)));
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_store_fails_with_connection_error() {
        let connector = DatabaseConnector::new(unreachable_config());

        let result = connector.connect().await;
        assert!(matches!(result, Err(AppError::Connection(_))));
        assert!(!connector.is_connected());

        // Failure is not cached, a second attempt goes back to the store
        let retry = connector.connect().await;
        assert!(matches!(retry, Err(AppError::Connection(_))));
    }

    #[tokio::test]
    async fn test_ping_unreachable_store() {
        let connector = DatabaseConnector::new(unreachable_config());
        let err = connector.ping().await.unwrap_err();
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_close_without_pool_is_noop() {
        let connector = DatabaseConnector::new(unreachable_config());
        connector.close().await;
        assert!(!connector.is_connected());
    }
}
