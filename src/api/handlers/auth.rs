use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::middleware::auth::SessionAuth;
use crate::api::state::AppState;
use crate::auth::jwt::create_token;
use crate::domain::errors::DiarioError;
use crate::domain::user::{resolve, AuthFailure, Identity, RepresentativeId};
use crate::session::Page;

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub representative_id: RepresentativeId,
    pub display_name: String,
}

/// Who is logged in and where they are
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub identity: Identity,
    pub current_page: Page,
    pub unsaved_board_changes: bool,
}

/// Login with the credentials of the users sheet
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let users = state.store.users().await?;

    // Password checks may run bcrypt; keep them off the async workers
    let resolved = tokio::task::spawn_blocking(move || {
        resolve(&req.email, &req.password, &users.rows)
    })
    .await
    .map_err(|e| ApiError::internal_server_error(format!("Login task failed: {}", e)))?;

    let identity = resolved.map_err(|failure| {
        if let AuthFailure::Ambiguous(count) = failure {
            tracing::warn!(
                "Login rejected: {} rows of the users sheet share the submitted credentials",
                count
            );
        }
        ApiError::from(DiarioError::AuthFailure)
    })?;

    let session_id = state.sessions.open(identity.clone()).await;
    let token = create_token(
        identity.representative_id.as_str(),
        session_id,
        &state.config.jwt_secret,
    )
    .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        representative_id: identity.representative_id,
        display_name: identity.display_name,
    }))
}

/// Ends the session, discarding any unsaved board edits
///
/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, auth: SessionAuth) -> StatusCode {
    state.sessions.close(auth.session_id).await;
    StatusCode::NO_CONTENT
}

/// GET /api/session
pub async fn session_info(auth: SessionAuth) -> Json<SessionResponse> {
    let session = auth.session.lock().await;

    Json(SessionResponse {
        identity: session.identity.clone(),
        current_page: session.current_page,
        unsaved_board_changes: session.board.as_ref().is_some_and(|b| b.is_dirty()),
    })
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
