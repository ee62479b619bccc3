mod api;
mod config;
mod db;
mod error;
mod geo;
mod geocode;
mod models;
mod seed;
mod services;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lantern")]
#[command(about = "Personal safety backend: SOS alerts, trusted circles, and a tiered incident feed")]
struct Args {
    /// Seed a small demo dataset (users, friendships, a circle) on startup
    #[arg(long)]
    seed_demo: bool,
}

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::db::{Database, LibSqlBackend, SafetyBackend};
use crate::geocode::GeocodeClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lantern=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.server.api_keys.is_empty() {
        tracing::warn!(
            "LANTERN_API_KEYS is not set — all API routes are locked. Set LANTERN_API_KEYS to enable access."
        );
    }

    tracing::info!("Initializing database...");
    let raw_db = Database::new(&config.database).await?;
    let db_backend = LibSqlBackend::new(raw_db);
    // Wrap in Arc<dyn SafetyBackend> immediately so we can clone it
    let db: Arc<dyn SafetyBackend> = Arc::new(db_backend);

    let geocoder = match &config.geocoder {
        Some(geocoder_config) => {
            tracing::info!("Initializing geocoder: {}...", geocoder_config.base_url);
            Some(GeocodeClient::new(geocoder_config)?)
        }
        None => {
            tracing::info!("Geocoder not configured - news items without coordinates will be skipped");
            None
        }
    };

    if args.seed_demo {
        seed::seed_demo(db.clone()).await?;
    }

    let state = AppState::new(config.clone(), db, geocoder);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Lantern starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, shutting down...");
}
