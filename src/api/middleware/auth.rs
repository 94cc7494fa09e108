use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::jwt::verify_token;
use crate::session::SharedSession;

/// Session extractor for protected routes
///
/// Verifies the bearer token and looks up the live session it names.
/// A valid token whose session was closed is rejected.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     SessionAuth { session, .. }: SessionAuth,
/// ) -> Result<String, ApiError> {
///     let session = session.lock().await;
///     Ok(format!("Hello {}", session.identity.display_name))
/// }
/// ```
pub struct SessionAuth {
    pub session_id: Uuid,
    pub session: SharedSession,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract the authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        // Extract bearer token
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
        })?;

        let claims = verify_token(token, &state.config.jwt_secret)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        let session = state
            .sessions
            .get(claims.sid)
            .await
            .ok_or_else(|| ApiError::unauthorized("Session expired, please log in again"))?;

        if !session.lock().await.identity.representative_id.matches(&claims.sub) {
            return Err(ApiError::unauthorized("Token does not match session"));
        }

        Ok(SessionAuth {
            session_id: claims.sid,
            session,
        })
    }
}
