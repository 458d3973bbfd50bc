//! UUID path parameter extractor with automatic validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use uuid::Uuid;

/// Extractor for the `id` path parameter as a UUID.
///
/// Returns a structured 400 when the segment is not a valid UUID, instead of
/// axum's default rejection text. Looks the parameter up by name so it
/// composes with routes that carry other parameters (e.g. `{version}`).
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        let id = params
            .get("id")
            .ok_or_else(|| AppError::BadRequest("Missing id path parameter".to_string()).into_response())?;

        match Uuid::parse_str(id) {
            Ok(uuid) => Ok(UuidPath(uuid)),
            Err(_) => Err(AppError::BadRequest(format!("Invalid UUID: {}", id)).into_response()),
        }
    }
}
