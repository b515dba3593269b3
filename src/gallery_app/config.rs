use std::path::{Path, PathBuf};

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Gallery client configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
    export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let server_url = std::env::var("CLIENT_API_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let mut builder = AppConfig::builder().server_url(server_url);
        if let Ok(dir) = std::env::var("SKETCHBOARD_EXPORT_DIR") {
            builder = builder.export_dir(dir);
        }
        // A malformed CLIENT_API_URL falls back to the default server.
        Self::with_builder(builder).unwrap_or_else(|e| {
            tracing::warn!("Ignoring client configuration ({}), using defaults", e);
            Self::from_app(AppConfig::default())
        })
    }
}

impl Config {
    /// Create a new configuration from the environment
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self::from_app(builder.build()?))
    }

    fn from_app(app: AppConfig) -> Self {
        let export_dir = app.export_dir.clone().unwrap_or_else(default_export_dir);
        Self { app, export_dir }
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Directory local exports are written to
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
}
