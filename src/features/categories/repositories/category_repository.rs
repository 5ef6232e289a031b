use std::sync::Arc;

use async_trait::async_trait;

use crate::core::database::DatabaseConnector;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;

/// Storage boundary for categories.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Make sure the underlying store is reachable. Idempotent.
    async fn connect(&self) -> Result<()>;

    /// All categories whose `active` flag is set.
    ///
    /// Ordering is whatever the store returns and is not guaranteed.
    async fn find_active(&self) -> Result<Vec<Category>>;
}

/// Postgres-backed repository over the `categories` table
pub struct PgCategoryRepository {
    connector: Arc<DatabaseConnector>,
}

impl PgCategoryRepository {
    pub fn new(connector: Arc<DatabaseConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn connect(&self) -> Result<()> {
        if !self.connector.is_connected() {
            tracing::debug!("Database not connected yet, connecting on demand");
        }
        self.connector.connect().await.map(|_| ())
    }

    async fn find_active(&self) -> Result<Vec<Category>> {
        let pool = self.connector.pool()?;

        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, parent_id, name, slug, description, image_url, display_order, active, created_at, updated_at
            FROM categories
            WHERE active = TRUE
            ORDER BY display_order, name
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::debug!("Active categories query failed: {:?}", e);
            AppError::Query(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_test::TestServer;

    use super::*;
    use crate::core::config::DatabaseConfig;
    use crate::features::categories::routes::routes;
    use crate::features::categories::services::CategoryService;
    use crate::shared::types::ErrorResponse;

    fn unreachable_connector() -> Arc<DatabaseConnector> {
        Arc::new(DatabaseConnector::new(DatabaseConfig {
            // Port 1 is reserved and nothing listens there
            url: "postgres://shop:pw@127.0.0.1:1/storefront".to_string(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_secs: 1,
            idle_timeout_secs: 60,
            max_lifetime_secs: 60,
            query_timeout_secs: 1,
        }))
    }

    #[tokio::test]
    async fn test_find_active_before_connect_is_not_connected() {
        let repository = PgCategoryRepository::new(unreachable_connector());

        let result = repository.find_active().await;
        assert!(matches!(result, Err(AppError::NotConnected)));
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_store_is_connection_error() {
        let connector = unreachable_connector();
        let repository = PgCategoryRepository::new(Arc::clone(&connector));

        let err = repository.connect().await.unwrap_err();
        assert!(err.is_connection_error());
        assert!(!connector.is_connected());
    }

    #[tokio::test]
    async fn test_endpoint_over_unreachable_store_returns_connection_error_body() {
        let repository = Arc::new(PgCategoryRepository::new(unreachable_connector()));
        let service = Arc::new(CategoryService::new(repository, Duration::from_secs(1)));
        let server = TestServer::new(routes(service)).unwrap();

        let response = server.get("/api/categories/active").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<ErrorResponse>(),
            ErrorResponse::new("Database connection unavailable")
        );
    }
}
