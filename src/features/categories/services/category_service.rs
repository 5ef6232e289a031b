use std::sync::Arc;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::repositories::CategoryRepository;

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
    query_timeout: Duration,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>, query_timeout: Duration) -> Self {
        Self {
            repository,
            query_timeout,
        }
    }

    /// Ensure the store connection is ready. Safe to call on every request.
    pub async fn ensure_connected(&self) -> Result<()> {
        self.repository.connect().await
    }

    /// List all active categories.
    ///
    /// Every call runs a fresh query. An empty store yields an empty list.
    pub async fn get_active_categories(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = tokio::time::timeout(self.query_timeout, self.repository.find_active())
            .await
            .map_err(|_| {
                tracing::error!(
                    "Active categories query exceeded {:?}",
                    self.query_timeout
                );
                AppError::Timeout(self.query_timeout)
            })??;

        tracing::debug!("Fetched {} active categories", categories.len());

        Ok(categories
            .into_iter()
            .filter(|c| c.active)
            .map(CategoryResponseDto::from)
            .collect())
    }
}
