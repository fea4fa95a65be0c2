use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Store not found: {0}")]
    StoreNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// A product referenced a store that does not exist
    #[error("Store {0} referenced by product does not exist")]
    InvalidStoreReference(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Convert InventoryError to AppError for standardized error responses
impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::StoreNotFound(_) => AppError::NotFound("Store not found".to_string()),
            InventoryError::ProductNotFound(_) => {
                AppError::NotFound("Product not found".to_string())
            }
            InventoryError::InvalidStoreReference(_) => {
                AppError::BadRequest("Store not found".to_string())
            }
            InventoryError::Validation(msg) => AppError::BadRequest(msg),
            InventoryError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = InventoryError::StoreNotFound(Uuid::now_v7()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = InventoryError::ProductNotFound(Uuid::now_v7()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_reference_is_a_client_error() {
        let response = InventoryError::InvalidStoreReference(Uuid::now_v7()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_is_a_server_error() {
        let err: InventoryError = sea_orm::DbErr::Custom("connection refused".to_string()).into();
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pool_exhaustion_is_service_unavailable() {
        let err: InventoryError =
            sea_orm::DbErr::ConnectionAcquire(sea_orm::ConnAcquireErr::Timeout).into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
