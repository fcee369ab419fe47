use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Stream URL is http(s)
/// - Command buffer is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let url = config.stream.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "stream.url must be an http(s) URL, got {:?}",
            config.stream.url
        )));
    }

    if config.display.command_buffer == 0 {
        return Err(ConfigError::ValidationError(
            "display.command_buffer cannot be 0".to_string(),
        ));
    }

    Ok(())
}
