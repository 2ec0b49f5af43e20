use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::auth::{AuthError, Session};
use crate::error::ApiError;
use crate::state::AppState;

/// Caller with a valid session and the admin role
#[derive(Clone, Debug)]
pub struct AdminSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = resolve_session(&parts.headers, state).await?;

        if !session.role.is_admin() {
            tracing::warn!(
                "Admin access denied for user '{}' with role {:?}",
                session.user_id,
                session.role
            );
            return Err(ApiError::unauthorized());
        }

        Ok(AdminSession(session))
    }
}

/// Caller's session if one is present and valid. Never rejects.
#[derive(Clone, Debug)]
pub struct OptionalSession(pub Option<Session>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(OptionalSession(resolve_session(&parts.headers, state).await.ok()))
    }
}

/// Resolve the caller's session through the configured session provider
pub async fn resolve_session(headers: &HeaderMap, state: &AppState) -> Result<Session, AuthError> {
    let token = extract_session_token(headers, &state.config.auth.session_cookie)?;
    state.sessions.resolve(&token).await
}

/// Bearer token from the Authorization header, falling back to the session cookie
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Result<String, AuthError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Invalid Authorization header format".to_string()))?;

        return match auth_str.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            Some(_) => Err(AuthError::MissingToken),
            None => Err(AuthError::InvalidToken(
                "Authorization header must use Bearer token format".to_string(),
            )),
        };
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .ok_or(AuthError::MissingToken)
}
