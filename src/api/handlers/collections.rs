use axum::{extract::State, Json};

use crate::api::errors::ApiError;
use crate::api::middleware::auth::SessionAuth;
use crate::api::state::AppState;
use crate::domain::goals::{available_collections, Collection};

/// GET /api/collections
pub async fn list_collections(
    State(state): State<AppState>,
    auth: SessionAuth,
) -> Result<Json<Vec<Collection>>, ApiError> {
    let representative_id = auth.session.lock().await.identity.representative_id.clone();
    let catalog = state.store.collections().await?;
    if !catalog.rows.is_empty() {
        return Ok(Json(catalog.rows.clone()));
    }

    let goals = state.store.goals().await?;
    Ok(Json(available_collections(&catalog.rows, &goals.rows, &representative_id)))
}
