use axum::{extract::State, Json};
use uuid::Uuid;

use crate::api::{JsonBody, PageQuery, PathParam, QueryParams};
use crate::database::models::{Invitation, NewInvitation, Page};
use crate::error::ApiError;
use crate::middleware::AdminSession;
use crate::state::AppState;

/// GET /api/admin/onboarding?page&pageSize - pending invitations
pub async fn invitation_list(
    _admin: AdminSession,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<Page<Invitation>>, ApiError> {
    let page = query.resolve(&state.config.api);
    Ok(Json(state.repository.list_pending_invitations(page).await?))
}

/// POST /api/admin/onboarding/invite {email, tenantName}
pub async fn invitation_create(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewInvitation>,
) -> Result<Json<Invitation>, ApiError> {
    body.validate()?;

    let invitation = state.repository.create_invitation(body, &admin.user_id).await?;
    tracing::info!("Admin '{}' invited '{}' to onboard '{}'", admin.email, invitation.email, invitation.tenant_name);
    Ok(Json(invitation))
}

/// POST /api/admin/onboarding/:id/revoke
pub async fn invitation_revoke(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Result<Json<Invitation>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|e| ApiError::operation_failed(format!("Invalid invitation id: {}", e)))?;

    let invitation = state.repository.revoke_invitation(id).await?;
    tracing::info!("Admin '{}' revoked invitation {}", admin.email, id);
    Ok(Json(invitation))
}
