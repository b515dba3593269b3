/**
 * Server Configuration
 *
 * This module handles loading of server configuration from the environment:
 * the optional PostgreSQL connection, the optional mail relay and the port.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (a `.env` file is read
 * by the binary first), with sensible defaults for local development.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * Services that fail to initialize are set to `None` and the server
 * continues without them.
 */

use sqlx::PgPool;

use crate::shared::ConfigError;

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Mail gateway settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRelayConfig {
    /// Gateway endpoint receiving one JSON message per export
    pub url: String,
    /// Bearer token sent to the gateway, if it needs one
    pub api_key: Option<String>,
    /// Sender address
    pub from: String,
}

impl MailRelayConfig {
    /// Read `MAIL_RELAY_URL`, `MAIL_RELAY_API_KEY` and `MAIL_FROM`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MAIL_RELAY_URL")
            .map_err(|_| ConfigError::MissingValue("MAIL_RELAY_URL"))?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(url));
        }

        Ok(Self {
            url,
            api_key: std::env::var("MAIL_RELAY_API_KEY").ok(),
            from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "sketchboard@localhost".to_string()),
        })
    }
}

/// Port from `SERVER_PORT`, falling back to [`DEFAULT_PORT`].
pub fn load_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Load the mail relay settings, or `None` when the relay is not configured.
pub fn load_mail_relay() -> Option<MailRelayConfig> {
    match MailRelayConfig::from_env() {
        Ok(config) => {
            tracing::info!("Mail relay configured: {}", config.url);
            Some(config)
        }
        Err(e) => {
            tracing::warn!("Mail relay disabled ({}). POST /email will answer 503.", e);
            None
        }
    }
}

/// Load and initialize database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if `DATABASE_URL` is not set or connection fails
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Images will be kept in memory.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Images will be kept in memory.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
