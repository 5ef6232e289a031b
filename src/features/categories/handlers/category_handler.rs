use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::services::CategoryService;
use crate::shared::types::ErrorResponse;

/// List active categories
///
/// Connects to the store if needed, then returns every category marked active.
/// The order of the list is not guaranteed.
#[utoipa::path(
    get,
    path = "/api/categories/active",
    responses(
        (status = 200, description = "Active categories", body = Vec<CategoryResponseDto>),
        (status = 500, description = "Store unavailable or query failed", body = ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn list_active_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<Vec<CategoryResponseDto>>> {
    service.ensure_connected().await?;
    let categories = service.get_active_categories().await?;
    Ok(Json(categories))
}

#[cfg(test)]
mod tests {
    use std::future::IntoFuture;
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::features::categories::routes::routes;
    use crate::features::categories::services::CategoryService;
    use crate::shared::constants::FALLBACK_ERROR_MESSAGE;
    use crate::shared::test_helpers::{category, InMemoryCategoryRepository};

    use super::*;

    const ENDPOINT: &str = "/api/categories/active";

    fn server(repository: Arc<InMemoryCategoryRepository>) -> TestServer {
        let service = Arc::new(CategoryService::new(repository, Duration::from_secs(5)));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_returns_active_categories() {
        let rings = category("Rings", true);
        let repository = Arc::new(InMemoryCategoryRepository::with_categories(vec![
            rings.clone(),
            category("Draft", false),
        ]));

        let response = server(repository).get(ENDPOINT).await;

        response.assert_status_ok();
        let body = response.json::<Vec<CategoryResponseDto>>();
        assert_eq!(body, vec![CategoryResponseDto::from(rings)]);
    }

    #[tokio::test]
    async fn test_returns_exactly_the_active_count() {
        for (active, inactive) in [(0, 0), (0, 4), (3, 0), (5, 7)] {
            let repository = Arc::new(InMemoryCategoryRepository::with_random(active, inactive));

            let response = server(repository).get(ENDPOINT).await;

            response.assert_status_ok();
            let body = response.json::<Vec<CategoryResponseDto>>();
            assert_eq!(body.len(), active);
            assert!(body.iter().all(|c| c.active));
        }
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_array() {
        let response = server(Arc::new(InMemoryCategoryRepository::default()))
            .get(ENDPOINT)
            .await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_connection_failure_returns_500_with_error() {
        let repository = Arc::new(InMemoryCategoryRepository::with_random(2, 0));
        repository.fail_connections();

        let response = server(Arc::clone(&repository)).get(ENDPOINT).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<ErrorResponse>();
        assert!(!body.error.is_empty());
        // The store is never queried when the connection is down
        assert_eq!(repository.query_count(), 0);
    }

    #[tokio::test]
    async fn test_query_failure_returns_fallback_message() {
        let repository = Arc::new(InMemoryCategoryRepository::with_random(2, 1));
        repository.fail_queries();

        let response = server(repository).get(ENDPOINT).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&serde_json::json!({ "error": FALLBACK_ERROR_MESSAGE }));
    }

    #[tokio::test]
    async fn test_concurrent_requests_return_identical_sets() {
        let repository = Arc::new(InMemoryCategoryRepository::with_random(6, 3));
        let server = server(repository);

        let (first, second) = tokio::join!(
            server.get(ENDPOINT).into_future(),
            server.get(ENDPOINT).into_future()
        );

        first.assert_status_ok();
        second.assert_status_ok();
        let mut first_ids: Vec<_> = first
            .json::<Vec<CategoryResponseDto>>()
            .into_iter()
            .map(|c| c.id)
            .collect();
        let mut second_ids: Vec<_> = second
            .json::<Vec<CategoryResponseDto>>()
            .into_iter()
            .map(|c| c.id)
            .collect();
        first_ids.sort();
        second_ids.sort();

        assert_eq!(first_ids.len(), 6);
        assert_eq!(first_ids, second_ids);
    }
}
