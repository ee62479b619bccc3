use libsql::{Builder, Connection};
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::Result;

use super::schema;

pub struct Database {
    pub(crate) db: Arc<libsql::Database>,
    pub(crate) busy_timeout_ms: u64,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let busy_timeout_ms = std::env::var("DATABASE_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5000);

        let db = if config.url.starts_with("libsql://") || config.url.starts_with("https://") {
            if let Some(ref local_path) = config.local_path {
                Builder::new_remote_replica(
                    local_path,
                    config.url.clone(),
                    config.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await?
            } else {
                Builder::new_remote(
                    config.url.clone(),
                    config.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await?
            }
        } else if config.url == ":memory:" {
            Builder::new_local(":memory:").build().await?
        } else {
            let path = config.url.strip_prefix("file:").unwrap_or(&config.url);
            Builder::new_local(path).build().await?
        };

        let database = Self {
            db: Arc::new(db),
            busy_timeout_ms,
        };
        database.configure_database().await?;
        database.init_schema().await?;

        Ok(database)
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(self.db.connect()?)
    }

    async fn configure_database(&self) -> Result<()> {
        let conn = self.connect()?;

        let pragmas = format!(
            "PRAGMA busy_timeout = {};\n\
             PRAGMA journal_mode = WAL;\n\
             PRAGMA synchronous = NORMAL;",
            self.busy_timeout_ms
        );
        if let Err(error) = conn.execute_batch(&pragmas).await {
            // In-memory and remote connections reject some pragmas; none of
            // them are required for correctness.
            tracing::warn!(error = %error, "Failed to apply SQLite pragmas");
        }

        Ok(())
    }

    async fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        schema::init_schema(&conn).await?;
        Ok(())
    }

    pub async fn sync(&self) -> Result<()> {
        if let Ok(sync) = self.db.sync().await {
            tracing::info!("Database synced: {:?}", sync);
        }
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }
}
