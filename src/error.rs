//! Error taxonomy shared by the service layer and the HTTP transport.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// One of `name`, `image` or `price` is absent from a create payload.
    #[error("Missing required fields (name, image, price)")]
    MissingFields,

    /// `price` was present but could not be read as a number.
    #[error("Invalid price value: {0}")]
    InvalidValue(String),

    #[error("Plant not found")]
    NotFound,

    /// The payload is unusable (malformed JSON, wrong types, or no mutable field).
    #[error("{0}")]
    InvalidRequest(String),

    /// Any database failure. The message is passed through to the caller.
    #[error("{0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl CatalogError {
    pub fn no_valid_data() -> Self {
        CatalogError::InvalidRequest("No valid data provided".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::MissingFields => StatusCode::BAD_REQUEST,
            CatalogError::InvalidValue(_) => StatusCode::BAD_REQUEST,
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CatalogError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CatalogError::InvalidValue("abc".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(CatalogError::no_valid_data().status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(CatalogError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            CatalogError::Persistence(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_into_response_renders_error_body() -> anyhow::Result<()> {
        let resp = CatalogError::NotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        let body: ErrorResponse = serde_json::from_slice(&bytes)?;
        assert_eq!(body.error, "Plant not found");
        Ok(())
    }

    #[test]
    fn test_persistence_message_passes_through() {
        let err = CatalogError::from(sqlx::Error::Protocol("disk I/O error".to_string()));
        assert!(err.to_string().contains("disk I/O error"));
    }
}
