use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::api::{non_empty, parse_positive, QueryParams};
use crate::database::models::UsageSummary;
use crate::error::ApiError;
use crate::middleware::AdminSession;
use crate::state::AppState;

/// Longest lookback window accepted for usage queries
const MAX_USAGE_DAYS: u32 = 366;

#[derive(Debug, Deserialize)]
pub struct UsageQuery {
    #[serde(rename = "tenantId")]
    pub tenant_id: Option<String>,
    pub days: Option<String>,
}

/// GET /api/admin/usage?tenantId&days
pub async fn usage_get(
    _admin: AdminSession,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<UsageQuery>,
) -> Result<Json<Vec<UsageSummary>>, ApiError> {
    let days = parse_positive(query.days.as_deref())
        .unwrap_or(state.config.api.default_usage_days)
        .min(MAX_USAGE_DAYS);
    let since = Utc::now() - Duration::days(days as i64);

    Ok(Json(state.repository.usage_summary(non_empty(query.tenant_id), since).await?))
}
