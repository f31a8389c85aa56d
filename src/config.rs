// ============================================================================
// CONFIG - Compile-time portal configuration
// ============================================================================
// Values come from option_env!() (build.rs forwards .env entries).
// ============================================================================

use serde::{Deserialize, Serialize};

const DEFAULT_BACKEND_DEVELOPMENT: &str = "http://localhost:8000";
const DEFAULT_BACKEND_PRODUCTION: &str = "https://api.molekschools.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub default_page_size: usize,
    /// `None` keeps the cached student snapshot until it is replaced.
    pub snapshot_max_age_hours: Option<i64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: DEFAULT_BACKEND_DEVELOPMENT.to_string(),
            backend_url_production: DEFAULT_BACKEND_PRODUCTION.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            default_page_size: 10,
            snapshot_max_age_hours: None,
        }
    }
}

impl AppConfig {
    /// Build the configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            default_page_size: parse_or(option_env!("DEFAULT_PAGE_SIZE"), defaults.default_page_size)
                .max(1),
            snapshot_max_age_hours: parse_optional(option_env!("SNAPSHOT_MAX_AGE_HOURS")),
        }
    }

    /// Backend base URL for the current environment
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    pub fn snapshot_max_age(&self) -> Option<chrono::Duration> {
        self.snapshot_max_age_hours.map(chrono::Duration::hours)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

fn parse_optional<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse().ok())
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
