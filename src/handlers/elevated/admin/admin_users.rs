use axum::{extract::State, Json};

use crate::api::{JsonBody, PageQuery, QueryParams};
use crate::database::models::{AdminUser, NewAdminUser, Page};
use crate::error::ApiError;
use crate::middleware::AdminSession;
use crate::state::AppState;

/// GET /api/admin/admin-users?page&pageSize
pub async fn admin_user_list(
    _admin: AdminSession,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<Page<AdminUser>>, ApiError> {
    let page = query.resolve(&state.config.api);
    Ok(Json(state.repository.list_admin_users(page).await?))
}

/// POST /api/admin/admin-users {email, role}
pub async fn admin_user_create(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewAdminUser>,
) -> Result<Json<AdminUser>, ApiError> {
    body.validate()?;

    let user = state.repository.create_admin_user(body).await?;
    tracing::info!("Admin '{}' created admin user '{}' ({})", admin.email, user.email, user.role);
    Ok(Json(user))
}
