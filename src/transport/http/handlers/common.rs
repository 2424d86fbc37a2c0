use crate::error::{CatalogError, CatalogResult};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;

/// Resolves the `{id}` path segment. Anything that is not an integer cannot name a stored
/// plant, so it is reported as not found.
pub fn plant_id(path: Result<Path<i64>, PathRejection>) -> CatalogResult<i64> {
    path.map(|Path(id)| id).map_err(|_| CatalogError::NotFound)
}

/// Unwraps a JSON body, turning a rejection into a 400 with the parser's message.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>, expected: &str) -> CatalogResult<T> {
    body.map(|Json(v)| v).map_err(|e| {
        CatalogError::InvalidRequest(format!(
            "Invalid JSON body: {} (expected: {})",
            e.body_text(),
            expected
        ))
    })
}
