use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub feed: FeedConfig,
    pub dispatch: DispatchConfig,
    pub geocoder: Option<GeocoderConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

/// Incident feed tuning. The radius is expressed in coordinate degrees,
/// matching the bounding box the map clients draw.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub default_radius_deg: f64,
    pub news_max_age_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    pub max_body_chars: usize,
}

/// Forward geocoder used by the news ingest path. Only constructed when an
/// API key is present; without it, items lacking coordinates are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("LANTERN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("LANTERN_PORT", 3000),
                api_keys: env::var("LANTERN_API_KEYS")
                    .map(|keys| keys.split(',').map(|s| s.trim().to_string()).collect())
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:lantern.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            feed: FeedConfig {
                default_radius_deg: parse_env_or("FEED_DEFAULT_RADIUS_DEG", 0.5),
                news_max_age_days: parse_env_or("FEED_NEWS_MAX_AGE_DAYS", 7),
            },
            dispatch: DispatchConfig {
                max_body_chars: parse_env_or("DISPATCH_MAX_BODY_CHARS", 255),
            },
            geocoder: env::var("GEOCODER_API_KEY").ok().map(|api_key| GeocoderConfig {
                api_key,
                base_url: env::var("GEOCODER_BASE_URL")
                    .unwrap_or_else(|_| "https://api.geoapify.com/v1/geocode/search".to_string()),
                timeout_secs: parse_env_or("GEOCODER_TIMEOUT", 10),
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
