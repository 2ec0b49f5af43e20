use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::context::{self, ClientContext};
use crate::middleware::auth::resolve_session;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";
pub const ONBOARDING_PATH: &str = "/onboarding";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The only two facts the guard looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingFlags {
    pub signed_in: bool,
    pub onboarding_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

impl OnboardingFlags {
    pub fn decide(&self, path: &str) -> GuardDecision {
        let on_onboarding = path == ONBOARDING_PATH || path.starts_with("/onboarding/");

        match (self.signed_in, self.onboarding_completed) {
            (false, _) => GuardDecision::Redirect(LOGIN_PATH),
            (true, false) if !on_onboarding => GuardDecision::Redirect(ONBOARDING_PATH),
            (true, true) if on_onboarding => GuardDecision::Redirect(DASHBOARD_PATH),
            _ => GuardDecision::Allow,
        }
    }
}

/// Redirects client page requests based on sign-in and onboarding state, and
/// hands the resolved `ClientContext` to the handler.
pub async fn onboarding_guard(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let session = resolve_session(request.headers(), &state).await.ok();
    let tenant = match &session {
        Some(session) => context::load_tenant(&state, session).await,
        None => None,
    };

    let flags = OnboardingFlags {
        signed_in: session.is_some(),
        onboarding_completed: tenant.as_ref().is_some_and(|t| t.onboarding_completed),
    };

    match (flags.decide(request.uri().path()), session) {
        (GuardDecision::Allow, Some(session)) => {
            request.extensions_mut().insert(ClientContext { session, tenant });
            next.run(request).await
        }
        (GuardDecision::Redirect(to), _) => {
            tracing::debug!("Onboarding guard redirecting {} -> {}", request.uri().path(), to);
            Redirect::to(to).into_response()
        }
        // Allow always implies signed in
        (GuardDecision::Allow, None) => Redirect::to(LOGIN_PATH).into_response(),
    }
}
