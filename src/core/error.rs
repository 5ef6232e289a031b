use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::constants::FALLBACK_ERROR_MESSAGE;
use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    /// The store could not be reached or rejected the credentials
    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// A query was attempted before the connector was initialized
    #[error("Database connector is not initialized")]
    NotConnected,

    #[error("Database query error: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Database query timed out after {0:?}")]
    Timeout(Duration),
}

impl AppError {
    pub fn is_connection_error(&self) -> bool {
        matches!(self, AppError::Connection(_))
    }

    /// Failures of the query itself, including not-initialized and timeout
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            AppError::NotConnected | AppError::Query(_) | AppError::Timeout(_)
        )
    }

    /// Short description that is safe to send to clients.
    ///
    /// Variants whose detail would leak driver or SQL internals return `None`.
    pub fn public_message(&self) -> Option<&'static str> {
        match self {
            AppError::Connection(_) => Some("Database connection unavailable"),
            AppError::Timeout(_) => Some("Database query timed out"),
            AppError::NotConnected | AppError::Query(_) => None,
        }
    }

    /// Category of the failure as reported in logs
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Connection(_) => "connection",
            AppError::NotConnected | AppError::Query(_) | AppError::Timeout(_) => "query",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind(), "Request failed: {:?}", self);

        let message = self.public_message().unwrap_or(FALLBACK_ERROR_MESSAGE);
        let body = Json(ErrorResponse::new(message));

        (self.status_code(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
