use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{JsonBody, PageQuery, PathParam, QueryParams};
use crate::database::models::{Page, SupportTicket, TicketStatus};
use crate::error::ApiError;
use crate::middleware::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TicketQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TicketStatusUpdate {
    pub status: TicketStatus,
}

/// GET /api/admin/support-tickets?page&pageSize&status
///
/// An unrecognised status filter is ignored rather than rejected.
pub async fn ticket_list(
    _admin: AdminSession,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TicketQuery>,
) -> Result<Json<Page<SupportTicket>>, ApiError> {
    let page = query.page.resolve(&state.config.api);
    let status = query
        .status
        .as_deref()
        .and_then(|s| serde_json::from_value::<TicketStatus>(s.trim().into()).ok());

    Ok(Json(state.repository.list_support_tickets(page, status).await?))
}

/// POST /api/admin/support-tickets/:id/status {status}
pub async fn ticket_status_update(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonBody(body): JsonBody<TicketStatusUpdate>,
) -> Result<Json<SupportTicket>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|e| ApiError::operation_failed(format!("Invalid ticket id: {}", e)))?;

    let ticket = state.repository.set_ticket_status(id, body.status).await?;
    tracing::info!("Admin '{}' set ticket {} to {}", admin.email, id, body.status.as_str());
    Ok(Json(ticket))
}
