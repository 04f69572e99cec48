//! Libris Server - Library Reservation System
//!
//! HTTP server combining a relational book catalog (SQLite) with a document
//! store for accounts and reservations (MongoDB).

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris_server::{
    api,
    config::AppConfig,
    repository::{accounts::AccountsRepository, Repository},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Libris Server v{}", env!("CARGO_PKG_VERSION"));

    // Open the catalog store, creating the database file on first run
    let connect_options = SqliteConnectOptions::from_str(&config.catalog.url)
        .expect("Invalid catalog database URL")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.catalog.max_connections)
        .connect_with(connect_options)
        .await
        .expect("Failed to open catalog database");

    tracing::info!("Connected to catalog store");

    // Connect to the document store
    let accounts = AccountsRepository::connect(&config.accounts)
        .await
        .expect("Failed to connect to account store");

    tracing::info!("Connected to account store");

    // Create repository, ensure the books schema exists
    let repository = Repository::new(pool, accounts);
    repository
        .catalog
        .ensure_schema()
        .await
        .expect("Failed to create catalog schema");

    tracing::info!("Catalog schema ready");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services, deriving the static admin credential
    let services = Services::new(repository, &config.auth).expect("Failed to create services");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let pages = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Home and dashboards
        .route("/", get(api::dashboard::home))
        .route("/user_dashboard", get(api::dashboard::user_dashboard))
        .route("/librarian_dashboard", get(api::dashboard::librarian_dashboard))
        // Authentication
        .route("/register", get(api::auth::register_view).post(api::auth::register))
        .route("/login", get(api::auth::login_view).post(api::auth::login))
        .route("/admin", get(api::auth::admin_login_view).post(api::auth::admin_login))
        .route("/logout", get(api::auth::logout))
        // Catalog
        .route("/books", get(api::books::book_list))
        .route("/add_book", post(api::books::add_book))
        .route("/edit_book/:book_id", get(api::books::edit_book_view).post(api::books::edit_book))
        .route("/reserve_book/:book_id", post(api::books::reserve_book))
        // Reservations
        .route("/reservations", get(api::reservations::view_reservations))
        .route("/user_profile/:user_id", get(api::reservations::user_profile))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(pages)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
