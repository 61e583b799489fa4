//! Service configuration loaded from an optional TOML file.
//!
//! Command-line arguments (see [`crate::app::Args`]) are layered on top of
//! whatever the file provides.

mod io;
mod types;

use std::path::PathBuf;
use thiserror::Error;

pub use io::{default_config_path, load_config, read_config_file, validate_config};
pub use types::{
    AppConfig, DatabaseConfig, PaginationConfig, ServerConfig, DEFAULT_ADDR, DEFAULT_CORS_ORIGINS,
    DEFAULT_DATABASE_URL,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
