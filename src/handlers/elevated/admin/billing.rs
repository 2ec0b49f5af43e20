use axum::{extract::State, Json};
use serde::Deserialize;

use crate::api::{non_empty, JsonBody, PageQuery, PathParam, QueryParams};
use crate::database::models::{Page, PlanChange, Subscription};
use crate::error::ApiError;
use crate::middleware::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BillingQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub status: Option<String>,
}

/// GET /api/admin/billing?page&pageSize&status
pub async fn billing_list(
    _admin: AdminSession,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<BillingQuery>,
) -> Result<Json<Page<Subscription>>, ApiError> {
    let page = query.page.resolve(&state.config.api);
    Ok(Json(state.repository.list_subscriptions(page, non_empty(query.status)).await?))
}

/// POST /api/admin/billing/:tenant_id/plan {plan}
pub async fn billing_plan_change(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    PathParam(tenant_id): PathParam<String>,
    JsonBody(body): JsonBody<PlanChange>,
) -> Result<Json<Subscription>, ApiError> {
    body.validate()?;

    let subscription = state.repository.change_plan(&tenant_id, body.plan.trim()).await?;
    tracing::info!("Admin '{}' moved tenant '{}' to plan '{}'", admin.email, tenant_id, subscription.plan);
    Ok(Json(subscription))
}
