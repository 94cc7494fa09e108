use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use super::{enter_page, CollectionQuery};
use crate::api::errors::ApiError;
use crate::api::middleware::auth::SessionAuth;
use crate::api::state::AppState;
use crate::domain::goals::resolve_collection;
use crate::domain::progress::{client_coverage, ClientCoverage};
use crate::session::Page;

#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    pub collection: String,
    pub clients: Vec<ClientCoverage>,
}

/// Clients served in a collection, biggest buyers first
///
/// GET /api/clients?collection=
pub async fn list_clients(
    State(state): State<AppState>,
    auth: SessionAuth,
    Query(query): Query<CollectionQuery>,
) -> Result<Json<ClientsResponse>, ApiError> {
    let representative_id = enter_page(&auth, Page::Clients).await;
    let collection = match query.collection.as_deref() {
        Some(requested) if !requested.trim().is_empty() => requested.trim().to_string(),
        _ => resolve_collection(&state.store.collections().await?.rows, None)?,
    };
    let sales = state.store.sales().await?;
    let clients = client_coverage(&representative_id, &collection, &sales.rows);

    Ok(Json(ClientsResponse {
        collection,
        clients,
    }))
}
