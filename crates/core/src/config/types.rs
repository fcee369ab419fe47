use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub stream: StreamConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with a static front-end bundle to serve (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dashboard_dir: None,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Recipe stream configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamConfig {
    /// SSE endpoint URL (e.g., "http://localhost:8000/stream")
    pub url: String,
    /// Connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    10
}

/// Display behaviour configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Delay before a completed, selected ticket is deselected (default: 1500)
    #[serde(default = "default_deselect_delay")]
    pub deselect_delay_ms: u64,
    /// Capacity of the display command channel (default: 256)
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            deselect_delay_ms: default_deselect_delay(),
            command_buffer: default_command_buffer(),
        }
    }
}

fn default_deselect_delay() -> u64 {
    1500
}

fn default_command_buffer() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_valid_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[stream]
url = "http://localhost:8000/stream"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.stream.url, "http://localhost:8000/stream");
        assert_eq!(config.stream.connect_timeout_secs, 10);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let toml = r#"
[stream]
url = "http://localhost:8000/stream"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert!(config.server.dashboard_dir.is_none());
        assert_eq!(config.display.deselect_delay_ms, 1500);
        assert_eq!(config.display.command_buffer, 256);
    }

    #[test]
    fn test_deserialize_missing_stream_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_display_section() {
        let toml = r#"
[stream]
url = "https://kitchen.example/stream"
connect_timeout_secs = 3

[display]
deselect_delay_ms = 250
command_buffer = 8

[server]
dashboard_dir = "/srv/kds"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.stream.connect_timeout_secs, 3);
        assert_eq!(config.display.deselect_delay_ms, 250);
        assert_eq!(config.display.command_buffer, 8);
        assert_eq!(
            config.server.dashboard_dir.as_deref().and_then(|p| p.to_str()),
            Some("/srv/kds")
        );
    }
}
