// handlers/protected - signed-in clients, behind the onboarding guard
//
// The guard has already redirected callers that are signed out or on the
// wrong side of onboarding, and inserted their `ClientContext`.

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::context::ClientContext;
use crate::database::models::Tenant;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub tenant_id: Option<String>,
    pub onboarding_completed: bool,
}

/// GET /dashboard - tenant context of the signed-in client
pub async fn dashboard_get(Extension(context): Extension<ClientContext>) -> Json<ClientContext> {
    Json(context)
}

/// GET /onboarding
pub async fn onboarding_get(Extension(context): Extension<ClientContext>) -> Json<OnboardingStatus> {
    Json(OnboardingStatus {
        tenant_id: context.session.tenant_id.clone(),
        onboarding_completed: context.tenant.is_some_and(|t| t.onboarding_completed),
    })
}

/// POST /onboarding/complete - marks the caller's tenant as onboarded
pub async fn onboarding_complete(
    State(state): State<AppState>,
    Extension(context): Extension<ClientContext>,
) -> Result<Json<Tenant>, ApiError> {
    let tenant_id = context
        .session
        .tenant_id
        .ok_or_else(|| ApiError::operation_failed("Session is not associated with a tenant"))?;

    let tenant = state.repository.complete_onboarding(&tenant_id).await?;
    tracing::info!("Tenant '{}' completed onboarding", tenant_id);

    Ok(Json(tenant))
}
