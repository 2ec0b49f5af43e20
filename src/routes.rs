use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{elevated::admin, protected, public};
use crate::middleware::onboarding_guard;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/api/session", get(public::session_get))
        // Signed-in clients
        .merge(client_routes(state.clone()))
        // Admin console
        .nest("/api/admin", admin_routes());

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security.cors_origins));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn client_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(protected::dashboard_get))
        .route("/onboarding", get(protected::onboarding_get))
        .route("/onboarding/complete", post(protected::onboarding_complete))
        .route_layer(from_fn_with_state(state, onboarding_guard))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/whoami", get(admin::whoami_get))
        // Tenants
        .route("/tenants", get(admin::tenant_list))
        .route("/tenants/:id", get(admin::tenant_show))
        .route("/tenants/:id/status", post(admin::tenant_status_update))
        // Operators
        .route("/admin-users", get(admin::admin_user_list).post(admin::admin_user_create))
        // Audit log
        .route("/audit-log", get(admin::audit_list))
        // Billing
        .route("/billing", get(admin::billing_list))
        .route("/billing/:tenant_id/plan", post(admin::billing_plan_change))
        // Usage
        .route("/usage", get(admin::usage_get))
        // Support
        .route("/support-tickets", get(admin::ticket_list))
        .route("/support-tickets/:id/status", post(admin::ticket_status_update))
        // Onboarding
        .route("/onboarding", get(admin::invitation_list))
        .route("/onboarding/invite", post(admin::invitation_create))
        .route("/onboarding/:id/revoke", post(admin::invitation_revoke))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::AUTHORIZATION, axum::http::header::CONTENT_TYPE]);

    // A wildcard cannot be combined with credentials or an explicit list
    if origins.iter().any(|origin| origin.trim() == "*") {
        tracing::warn!("CORS origins contain '*'; allowing any origin without credentials");
        return base.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins)).allow_credentials(true)
}
