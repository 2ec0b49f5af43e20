// handlers/public - no session required

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::context::SessionContext;
use crate::middleware::OptionalSession;
use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Admin Gateway",
        "version": version,
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "session": "/api/session (public, reports current session)",
            "dashboard": "/dashboard, /onboarding (signed-in clients)",
            "admin": "/api/admin/* (admin session required)",
        }
    }))
}

/// GET /health - pings the backing store
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.repository.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "error": "database unavailable"
                })),
            )
        }
    }
}

/// GET /api/session - current auth and tenant state, for any caller
pub async fn session_get(
    State(state): State<AppState>,
    OptionalSession(session): OptionalSession,
) -> Json<SessionContext> {
    Json(SessionContext::load(&state, session).await)
}
