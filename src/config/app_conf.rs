use std::env;
use tracing::warn;

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the intake endpoints cross-origin, in
    /// priority order. The first entry doubles as the value reflected to
    /// origins that are not on the list.
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let allowed_origins: Vec<String> = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| {
                warn!("ALLOWED_ORIGINS not set, defaulting to the production site origin");
                "https://www.oakridgeremodeling.com".to_string()
            })
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        AppConfig {
            host,
            port,
            allowed_origins,
        }
    }
}
