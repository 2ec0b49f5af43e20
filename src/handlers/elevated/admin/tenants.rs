use axum::{extract::State, Json};
use serde::Deserialize;

use crate::api::{non_empty, JsonBody, PageQuery, PathParam, QueryParams};
use crate::database::models::{Page, Tenant, TenantStatus};
use crate::error::ApiError;
use crate::middleware::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TenantListQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TenantStatusUpdate {
    pub status: TenantStatus,
}

/// GET /api/admin/tenants?page&pageSize&search
pub async fn tenant_list(
    _admin: AdminSession,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TenantListQuery>,
) -> Result<Json<Page<Tenant>>, ApiError> {
    let page = query.page.resolve(&state.config.api);
    let tenants = state.repository.list_tenants(page, non_empty(query.search)).await?;
    Ok(Json(tenants))
}

/// GET /api/admin/tenants/:id
pub async fn tenant_show(
    _admin: AdminSession,
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Result<Json<Tenant>, ApiError> {
    Ok(Json(state.repository.get_tenant(&id).await?))
}

/// POST /api/admin/tenants/:id/status {status}
pub async fn tenant_status_update(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonBody(body): JsonBody<TenantStatusUpdate>,
) -> Result<Json<Tenant>, ApiError> {
    let tenant = state.repository.set_tenant_status(&id, body.status).await?;
    tracing::info!("Admin '{}' set tenant '{}' status to {}", admin.email, id, body.status.as_str());
    Ok(Json(tenant))
}
