use axum::Json;

use crate::auth::Session;
use crate::error::ApiError;
use crate::middleware::AdminSession;

/// GET /api/admin/whoami
///
/// The one admin route that answers a missing or non-admin session with 401
/// rather than 400.
pub async fn whoami_get(admin: Result<AdminSession, ApiError>) -> Result<Json<Session>, ApiError> {
    let AdminSession(session) = admin.map_err(ApiError::into_unauthenticated)?;
    Ok(Json(session))
}
