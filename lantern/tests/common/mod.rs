use std::net::SocketAddr;
use std::sync::Arc;

use nanoid::nanoid;
use tempfile::TempDir;

use lantern::api::{create_router, AppState};
use lantern::config::{Config, DatabaseConfig, DispatchConfig, FeedConfig, ServerConfig};
use lantern::db::{Database, LibSqlBackend, SafetyBackend};
use lantern::models::{Friendship, User};

pub const TEST_API_KEY: &str = "test-key";

pub fn test_config(db_url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            api_keys: vec![TEST_API_KEY.to_string()],
        },
        database: DatabaseConfig {
            url: db_url,
            auth_token: None,
            local_path: None,
        },
        feed: FeedConfig {
            default_radius_deg: 0.5,
            news_max_age_days: 7,
        },
        dispatch: DispatchConfig { max_body_chars: 255 },
        geocoder: None,
    }
}

/// A fresh file-backed database plus its backend handle. The TempDir must
/// stay alive for as long as the backend is used.
pub async fn setup_backend() -> (TempDir, Arc<dyn SafetyBackend>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("lantern_test.db");
    let db_url = format!("file:{}", db_path.to_str().unwrap());

    let db = Database::new(&test_config(db_url).database)
        .await
        .expect("Failed to create database");
    let backend: Arc<dyn SafetyBackend> = Arc::new(LibSqlBackend::new(db));
    (temp_dir, backend)
}

/// Boot the full app on an ephemeral port and hand back the address, the
/// TempDir guard, and a backend handle into the same database for seeding.
pub async fn setup_test_app() -> (SocketAddr, TempDir, Arc<dyn SafetyBackend>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("lantern_test.db");
    let db_url = format!("file:{}", db_path.to_str().unwrap());

    let config = test_config(db_url);
    let db = Database::new(&config.database)
        .await
        .expect("Failed to create database");
    let backend: Arc<dyn SafetyBackend> = Arc::new(LibSqlBackend::new(db));

    let state = AppState::new(config, backend.clone(), None);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    (addr, temp_dir, backend)
}

pub async fn create_user(db: &dyn SafetyBackend, id: &str, name: &str) {
    db.create_user(&User::new(id.to_string(), name.to_string()))
        .await
        .unwrap_or_else(|e| panic!("Failed to create user '{id}': {e}"));
}

pub async fn befriend(db: &dyn SafetyBackend, user_id: &str, friend_id: &str) {
    db.create_friendship(&Friendship::new(
        nanoid!(),
        user_id.to_string(),
        friend_id.to_string(),
    ))
    .await
    .unwrap_or_else(|e| panic!("Failed to befriend '{user_id}' and '{friend_id}': {e}"));
}
