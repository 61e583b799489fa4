use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, validate_config, AppConfig, ConfigError};

/// Blog API - REST service for posts and their tags
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file (default: ~/.blog-api/config.toml, optional)
    #[arg(short, long, env = "BLOG_API_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind the server to; overrides `server.addr`
    #[arg(short, long, env = "BLOG_API_ADDR")]
    pub addr: Option<String>,

    /// `SQLite` connection URL; overrides `database.url`
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Comma-separated list of allowed CORS origins; overrides `server.cors_origins`.
    /// Use "*" to allow all origins (not recommended for production).
    #[arg(long, env = "BLOG_API_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "BLOG_API_LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "BLOG_API_LOG_ROTATION", default_value = "daily")]
    pub log_rotation: String,

    /// Custom log directory (default: ~/.blog-api/logs)
    #[arg(long, env = "BLOG_API_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// Load the config file, layer the overrides on top and validate the
    /// result.
    pub fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        let config = self.apply(load_config(self.config.as_deref())?);
        validate_config(&config)?;
        Ok(config)
    }

    /// Layer command-line overrides on top of the file configuration.
    #[must_use]
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(addr) = &self.addr {
            config.server.addr.clone_from(addr);
        }
        if let Some(url) = &self.database_url {
            config.database.url.clone_from(url);
        }
        if let Some(origins) = &self.cors_origins {
            config.server.cors_origins.clone_from(origins);
        }
        config
    }
}
