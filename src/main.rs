//! Charsheet Engine - Backend for a tabletop character sheet builder
//!
//! The Engine is the backend server that:
//! - Holds the character sheet and keeps its derived statistics consistent
//! - Rolls ability scores (4d6, drop the lowest) with optional auto-fill
//! - Manages colour themes, including a user-editable custom palette
//! - Exports the sheet as a two-page document
//! - Pushes every change to connected clients over WebSocket

mod application;
mod domain;
mod infrastructure;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::value_objects::AppSettings;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;
use crate::infrastructure::workers::persistence_worker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charsheet_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Charsheet Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    let settings = AppSettings::from_env();
    tracing::info!("Configuration loaded");
    tracing::info!("  Persistence: {:?}", config.persistence_backend);
    tracing::info!("  Default theme: {}", settings.default_theme);
    tracing::info!(
        "  Dice timing: {}ms rolling, {}ms result",
        settings.dice_rolling_delay_ms,
        settings.dice_result_display_ms
    );

    // Initialize application state
    let state = AppState::new(config, settings).await?;
    let state = Arc::new(state);
    tracing::info!("Application state initialized");

    // Persist every store change in the background
    let persistence_task = {
        let events = state.events.subscribe();
        let repository = state.repository.clone();
        tokio::spawn(persistence_worker(events, repository))
    };

    let addr = state.config.bind_address();

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(infrastructure::websocket::ws_handler))
        // Merge REST API routes
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server = axum::serve(listener, app);

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, stopping workers...");
            persistence_task.abort();
            tracing::info!("Workers stopped");
        }
    }

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
