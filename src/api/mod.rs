// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    routing::{get, patch, post},
    Router,
};

use handlers::{auth, clients, collections, dashboard, kanban, sales, weeks};
pub use state::AppState;

/// Builds the application routes over shared state
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(auth::health_check))
        // Auth routes
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/session", get(auth::session_info))
        // Report pages
        .route("/api/dashboard", get(dashboard::dashboard))
        .route("/api/weeks", get(weeks::list_weeks))
        .route("/api/weeks/:start/sales", get(weeks::week_sales))
        .route("/api/clients", get(clients::list_clients))
        .route("/api/collections", get(collections::list_collections))
        // Visit form
        .route("/api/sales", post(sales::create_sale))
        // Action board
        .route("/api/kanban", get(kanban::get_board))
        .route("/api/kanban/items", post(kanban::create_item))
        .route("/api/kanban/items/:id", patch(kanban::update_item))
        .route("/api/kanban/save", post(kanban::save_board))
        .route("/api/kanban/discard", post(kanban::discard_board))
        .with_state(state)
}
