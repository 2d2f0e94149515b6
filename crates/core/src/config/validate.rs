use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Remote base URL is present and http(s)
/// - Server port is not 0
/// - Download worker pool is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.remote.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "remote.base_url cannot be empty".to_string(),
        ));
    }
    if !config.remote.base_url.starts_with("http://")
        && !config.remote.base_url.starts_with("https://")
    {
        return Err(ConfigError::ValidationError(
            "remote.base_url must start with http:// or https://".to_string(),
        ));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.sync.max_parallel_downloads == 0 {
        return Err(ConfigError::ValidationError(
            "sync.max_parallel_downloads cannot be 0".to_string(),
        ));
    }

    Ok(())
}
