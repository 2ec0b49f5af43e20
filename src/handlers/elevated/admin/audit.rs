use axum::{extract::State, Json};
use serde::Deserialize;

use crate::api::{non_empty, PageQuery, QueryParams};
use crate::database::models::{AuditEntry, AuditFilter, Page};
use crate::error::ApiError;
use crate::middleware::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(rename = "tenantId")]
    pub tenant_id: Option<String>,
    pub action: Option<String>,
}

/// GET /api/admin/audit-log?page&pageSize&tenantId&action
pub async fn audit_list(
    _admin: AdminSession,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AuditQuery>,
) -> Result<Json<Page<AuditEntry>>, ApiError> {
    let page = query.page.resolve(&state.config.api);
    let filter = AuditFilter {
        tenant_id: non_empty(query.tenant_id),
        action: non_empty(query.action),
    };

    Ok(Json(state.repository.list_audit_entries(page, filter).await?))
}
