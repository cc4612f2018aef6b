/// Configuration management for Social Feed Service
///
/// Loads configuration from environment variables.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Bearer token validation
    pub auth: AuthConfig,
    /// Feed paging and candidate limits
    pub feed: FeedConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port
    pub http_port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Min connections in pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    /// Apply embedded migrations at startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

/// Tokens are issued by the hosted auth provider; this service only validates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 shared secret of the auth provider
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Expected `aud` claim
    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_limit")]
    pub default_limit: u32,
    #[serde(default = "default_feed_max_limit")]
    pub max_limit: u32,
    /// Upper bound on native posts loaded into one merged candidate set; 0 = unbounded
    #[serde(default = "default_feed_max_candidates")]
    pub max_candidates: u32,
}

impl FeedConfig {
    /// Row cap for the native-post query, `None` when unbounded
    pub fn candidate_cap(&self) -> Option<i64> {
        (self.max_candidates > 0).then(|| i64::from(self.max_candidates))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_limit: default_feed_limit(),
            max_limit: default_feed_max_limit(),
            max_candidates: default_feed_max_candidates(),
        }
    }
}

// Default values
fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

fn default_run_migrations() -> bool {
    true
}

fn default_jwt_audience() -> String {
    "authenticated".to_string()
}

fn default_feed_limit() -> u32 {
    20
}

fn default_feed_max_limit() -> u32 {
    100
}

fn default_feed_max_candidates() -> u32 {
    0
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env_or("PORT", 8080),
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL environment variable not set")?,
            max_connections: env_or("DB_MAX_CONNECTIONS", default_max_connections()),
            min_connections: env_or("DB_MIN_CONNECTIONS", default_min_connections()),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", default_acquire_timeout_secs()),
            run_migrations: env_or("RUN_MIGRATIONS", default_run_migrations()),
        };

        let auth = AuthConfig {
            jwt_secret: std::env::var("AUTH_JWT_SECRET")
                .context("AUTH_JWT_SECRET environment variable not set")?,
            jwt_audience: std::env::var("AUTH_JWT_AUDIENCE")
                .unwrap_or_else(|_| default_jwt_audience()),
        };

        let feed = FeedConfig {
            default_limit: env_or("FEED_DEFAULT_LIMIT", default_feed_limit()),
            max_limit: env_or("FEED_MAX_LIMIT", default_feed_max_limit()),
            max_candidates: env_or("FEED_MAX_CANDIDATES", default_feed_max_candidates()),
        };

        if feed.default_limit == 0 || feed.default_limit > feed.max_limit {
            anyhow::bail!(
                "FEED_DEFAULT_LIMIT must be between 1 and FEED_MAX_LIMIT ({})",
                feed.max_limit
            );
        }

        Ok(Config {
            app,
            database,
            auth,
            feed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        std::env::set_var("DATABASE_URL", "postgres://test");
        std::env::set_var("AUTH_JWT_SECRET", "secret");

        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.http_port, 8080);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.min_connections, 2);
        assert!(config.database.run_migrations);
        assert_eq!(config.auth.jwt_audience, "authenticated");
        assert_eq!(config.feed.default_limit, 20);
        assert_eq!(config.feed.max_limit, 100);
        assert_eq!(config.feed.max_candidates, 0);
    }

    #[test]
    fn test_candidate_cap() {
        let mut feed = FeedConfig::default();
        assert_eq!(feed.candidate_cap(), None);

        feed.max_candidates = 250;
        assert_eq!(feed.candidate_cap(), Some(250));
    }
}
