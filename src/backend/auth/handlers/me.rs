/**
 * Current Identity Handler
 *
 * `GET /api/me` returns the identity the auth gate attached to the request.
 * It is only ever registered behind the gate.
 */

use axum::extract::Request;
use axum::Json;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::{extract_identity, Identity};

/// Get current identity handler
///
/// # Example Response
///
/// ```json
/// {"id": "123e4567-e89b-42d3-a456-426614174000", "login": "bob_1"}
/// ```
pub async fn get_me(req: Request) -> Result<Json<Identity>, BackendError> {
    let identity = extract_identity(&req)?;
    Ok(Json(identity))
}
