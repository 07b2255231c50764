/// Configuration management for blog-service
///
/// Settings come from environment variables (a `.env` file is loaded first by
/// the binaries). Database settings are read separately by `db_pool::DbConfig`.
use db_pool::env_utils::{parse_env_optional, parse_env_with_default};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// List pagination settings
    pub pagination: PaginationConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// HTTP worker threads
    pub workers: usize,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Pagination settings shared by list endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Upper bound applied to a requested `limit`
    pub max_limit: Option<i64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) if !value.trim().is_empty() => value,
            _ if production => {
                return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
            }
            _ => "http://localhost:3000".to_string(),
        };

        if production && allowed_origins.split(',').any(|o| o.trim() == "*") {
            return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
        }

        let max_limit = parse_env_optional::<i64>("PAGINATION_MAX_LIMIT");
        if let Some(limit) = max_limit {
            if limit <= 0 {
                return Err(format!(
                    "PAGINATION_MAX_LIMIT must be positive, got {}",
                    limit
                ));
            }
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("BLOG_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_with_default("BLOG_SERVICE_PORT", 8080),
                workers: parse_env_with_default("HTTP_WORKERS", 4),
            },
            cors: CorsConfig { allowed_origins },
            pagination: PaginationConfig { max_limit },
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}

impl CorsConfig {
    /// Individual origins, trimmed, blanks dropped
    pub fn origins(&self) -> Vec<&str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .collect()
    }
}
