use diario_bordo_api::api::{self, AppState};
use diario_bordo_api::config::AppConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    tracing::info!("Reading tables from {}", config.files.users.parent().map_or_else(
        || ".".to_string(),
        |dir| dir.display().to_string(),
    ));

    let state = AppState::new(config);
    let addr = state.config.bind_addr;

    // Report unreadable or misnamed sheets up front; pages that read them
    // fail with the same error until the file is fixed
    let store = &state.store;
    let (users, sales, goals, schedule, catalog) = tokio::join!(
        store.users(),
        store.sales(),
        store.goals(),
        store.schedule(),
        store.collections(),
    );
    if let (Ok(users), Ok(sales)) = (&users, &sales) {
        tracing::info!(
            "Loaded {} users and {} sales rows",
            users.rows.len(),
            sales.rows.len()
        );
    }
    let failures = [
        users.err(),
        sales.err(),
        goals.err(),
        schedule.err(),
        catalog.err(),
    ];
    for error in failures.into_iter().flatten() {
        tracing::error!("Failed to load table: {}", error);
    }

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = api::router(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
