// src/main.rs

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// --- Module Declarations ---
mod config;
mod error;
mod game;
mod state;
mod trivia;
mod web;

// --- Imports ---
use crate::config::load_settings;
use crate::error::Result as AppResult;
use crate::game::store::SessionStore;
use crate::state::AppState;
use crate::trivia::client::TriviaApiClient;
use crate::web::run_server;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Setup tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info,tower_http=debug", env!("CARGO_PKG_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load Configuration
    let app_settings = load_settings()?;
    tracing::info!("Configuration loaded: {:?}", app_settings);

    // Initialize the upstream trivia client
    let trivia_client = Arc::new(TriviaApiClient::new(app_settings.upstream.base_url.clone()));
    tracing::info!(
        upstream.base_url = %app_settings.upstream.base_url,
        "Trivia client initialized"
    );

    // Create AppState
    let app_state = AppState {
        trivia: trivia_client,
        sessions: Arc::new(SessionStore::new()),
    };

    // Run the web server
    run_server(app_state, app_settings.server).await?;

    Ok(())
}
