//! Session and tenant context handed to client-facing handlers.

use serde::Serialize;

use crate::auth::Session;
use crate::database::models::Tenant;
use crate::state::AppState;

/// Auth state for any caller, signed in or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub signed_in: bool,
    pub user: Option<Session>,
    pub tenant: Option<Tenant>,
}

impl SessionContext {
    pub async fn load(state: &AppState, session: Option<Session>) -> Self {
        let tenant = match &session {
            Some(session) => load_tenant(state, session).await,
            None => None,
        };

        Self {
            signed_in: session.is_some(),
            user: session,
            tenant,
        }
    }
}

/// Context of a signed-in client, inserted by the onboarding guard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientContext {
    pub session: Session,
    pub tenant: Option<Tenant>,
}

/// Tenant row of the session's tenant. Lookup failures read as "no tenant".
pub async fn load_tenant(state: &AppState, session: &Session) -> Option<Tenant> {
    let tenant_id = session.tenant_id.as_deref()?;

    match state.repository.get_tenant(tenant_id).await {
        Ok(tenant) => Some(tenant),
        Err(e) => {
            tracing::warn!("Could not load tenant '{}' for user '{}': {}", tenant_id, session.user_id, e);
            None
        }
    }
}
