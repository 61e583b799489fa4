use super::types::AppConfig;
use super::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Resolve the default config file path (`~/.blog-api/config.toml`).
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".blog-api").join("config.toml"))
}

/// Load the configuration.
///
/// With an explicit `path` the file must exist. Without one the default
/// location is tried and a missing file yields `AppConfig::default()`.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            read_config_file(path)?
        }
        None => match default_config_path() {
            Some(path) if path.exists() => read_config_file(&path)?,
            Some(path) => {
                debug!("Config not found at {}; using defaults", path.display());
                AppConfig::default()
            }
            None => {
                warn!("Could not determine home directory; using default config");
                AppConfig::default()
            }
        },
    };

    validate_config(&config)?;
    Ok(config)
}

/// Parse a config file without semantic validation.
pub fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Check the cross-field rules `serde` cannot express.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let pagination = &config.pagination;
    if pagination.default_page_size == 0 {
        return Err(ConfigError::Invalid(
            "pagination.default_page_size must be at least 1".to_string(),
        ));
    }
    if pagination.default_page_size > pagination.max_page_size {
        return Err(ConfigError::Invalid(format!(
            "pagination.default_page_size ({}) exceeds pagination.max_page_size ({})",
            pagination.default_page_size, pagination.max_page_size
        )));
    }
    if config.database.max_connections == 0 {
        return Err(ConfigError::Invalid(
            "database.max_connections must be at least 1".to_string(),
        ));
    }
    if config.server.addr.trim().is_empty() {
        return Err(ConfigError::Invalid("server.addr cannot be empty".to_string()));
    }
    if config.database.url.trim().is_empty() {
        return Err(ConfigError::Invalid("database.url cannot be empty".to_string()));
    }
    Ok(())
}
