use std::sync::Arc;

use crate::config::Config;
use crate::db::SafetyBackend;
use crate::geocode::GeocodeClient;
use crate::services::{
    AlertService, CircleService, FeedService, FriendService, NewsService, ReportService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn SafetyBackend>,
    pub feed: FeedService,
    pub alerts: AlertService,
    pub circles: CircleService,
    pub friends: FriendService,
    pub reports: ReportService,
    pub news: NewsService,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn SafetyBackend>, geocoder: Option<GeocodeClient>) -> Self {
        let config = Arc::new(config);
        let feed = FeedService::new(db.clone(), config.feed.news_max_age_days);
        let alerts = AlertService::new(db.clone(), config.dispatch.max_body_chars);
        let circles = CircleService::new(db.clone());
        let friends = FriendService::new(db.clone());
        let reports = ReportService::new(db.clone());
        let news = NewsService::new(db.clone(), geocoder);

        Self {
            config,
            db,
            feed,
            alerts,
            circles,
            friends,
            reports,
            news,
        }
    }

    /// In-memory state for router and handler tests: fresh database, no
    /// geocoder, default tuning.
    #[cfg(test)]
    pub async fn for_tests(api_keys: Vec<String>) -> Self {
        use crate::config::{DatabaseConfig, DispatchConfig, FeedConfig, ServerConfig};

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                api_keys,
            },
            database: DatabaseConfig {
                url: ":memory:".to_string(),
                auth_token: None,
                local_path: None,
            },
            feed: FeedConfig {
                default_radius_deg: 0.5,
                news_max_age_days: 7,
            },
            dispatch: DispatchConfig {
                max_body_chars: 255,
            },
            geocoder: None,
        };

        let raw_db = crate::db::Database::new(&config.database).await.unwrap();
        let backend = crate::db::LibSqlBackend::new(raw_db);
        let db: Arc<dyn SafetyBackend> = Arc::new(backend);

        Self::new(config, db, None)
    }
}
