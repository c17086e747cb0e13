//! Creamline storefront REST API.
//!
//! Serves the public storefront endpoints (CMS pages, contact form) and the
//! admin back office (subscriptions, daily requirement, CMS editing, inbox)
//! as JSON over HTTP.

mod auth;
mod config;
mod error;
mod routes;
mod state;

use database::Database;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting storefront API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;
    database::seed::seed_if_empty(db.pool()).await?;

    // Build application state
    let state = AppState::new(db);

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Storefront API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
