// config.rs
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api.football-data.org/v4";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub football_api_key: String,
    pub football_api_base_url: String,
    pub cache_dir: PathBuf,
    pub finished_ttl_hours: i64,
    pub port: u16,
    pub host: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // An empty key is allowed at startup; requests are rejected with a
        // configuration error until one is provided.
        let football_api_key = env::var("FOOTBALL_API_KEY").unwrap_or_default();

        AppConfig {
            football_api_key,
            football_api_base_url: env::var("FOOTBALL_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            cache_dir: env::var("MATCH_CACHE_DIR")
                .unwrap_or_else(|_| "cache/matches".to_string())
                .into(),
            finished_ttl_hours: env::var("FINISHED_CACHE_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            port: env::var("PORT")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.football_api_key.is_empty()
    }
}
