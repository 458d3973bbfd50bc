use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::version::ApiVersion;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Unsupported API version '{0}'")]
    UnsupportedVersion(String),

    #[error("{operation} is not supported by API {version}")]
    OperationNotSupported {
        operation: &'static str,
        version: ApiVersion,
    },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses.
///
/// A gated-off endpoint reports the same NotFound a missing record does;
/// callers must not be able to tell the difference.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            CatalogError::UnsupportedVersion(token) => {
                AppError::BadRequest(format!("Unsupported API version '{}'", token))
            }
            CatalogError::OperationNotSupported { operation, version } => {
                AppError::MethodNotAllowed(format!(
                    "{} is not supported by API {}",
                    operation, version
                ))
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Store(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
