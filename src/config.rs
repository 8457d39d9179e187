//! Configuration module for roomhub.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, RoomHubError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5148
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Chat hub configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Room that exists when the hub starts.
    #[serde(default = "default_room")]
    pub default_room: String,
    /// Refuse `DeleteRoom` for the default room.
    #[serde(default)]
    pub protect_default_room: bool,
    /// Outbound events buffered per connection before new ones are dropped.
    #[serde(default = "default_outbound_capacity")]
    pub outbound_capacity: usize,
    /// Largest inbound WebSocket frame accepted, in bytes.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

fn default_room() -> String {
    "General".to_string()
}

fn default_outbound_capacity() -> usize {
    256
}

fn default_max_frame_bytes() -> usize {
    64 * 1024
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_room: default_room(),
            protect_default_room: false,
            outbound_capacity: default_outbound_capacity(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty disables file output.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/roomhub.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Chat hub configuration.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(RoomHubError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RoomHubError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ROOMHUB_HOST`: Override the bind address
    /// - `ROOMHUB_PORT`: Override the listening port
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("ROOMHUB_HOST") {
            if !host.is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = std::env::var("ROOMHUB_PORT") {
            if !port.is_empty() {
                self.server.port = port
                    .parse()
                    .map_err(|e| RoomHubError::Config(format!("ROOMHUB_PORT: {e}")))?;
            }
        }
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The default room name is empty
    /// - The outbound queue capacity or frame limit is zero
    pub fn validate(&self) -> Result<()> {
        if self.chat.default_room.is_empty() {
            return Err(RoomHubError::Validation(
                "chat.default_room must not be empty".to_string(),
            ));
        }
        if self.chat.outbound_capacity == 0 {
            return Err(RoomHubError::Validation(
                "chat.outbound_capacity must be greater than zero".to_string(),
            ));
        }
        if self.chat.max_frame_bytes == 0 {
            return Err(RoomHubError::Validation(
                "chat.max_frame_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5148);
        assert!(config.server.cors_origins.is_empty());

        assert_eq!(config.chat.default_room, "General");
        assert!(!config.chat.protect_default_room);
        assert_eq!(config.chat.outbound_capacity, 256);
        assert_eq!(config.chat.max_frame_bytes, 65536);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/roomhub.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
cors_origins = ["http://localhost:5000"]

[chat]
default_room = "Lobby"
protect_default_room = true
outbound_capacity = 32
max_frame_bytes = 1024

[logging]
level = "debug"
file = "custom/logs/chat.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5000"]);

        assert_eq!(config.chat.default_room, "Lobby");
        assert!(config.chat.protect_default_room);
        assert_eq!(config.chat.outbound_capacity, 32);
        assert_eq!(config.chat.max_frame_bytes, 1024);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/chat.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[chat]
protect_default_room = true
"#;

        let config = Config::parse(toml).unwrap();

        assert!(config.chat.protect_default_room);
        assert_eq!(config.chat.default_room, "General");
        assert_eq!(config.server.port, 5148);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.chat.default_room, "General");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(RoomHubError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(RoomHubError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 7000").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_apply_env_overrides() {
        let original_host = std::env::var("ROOMHUB_HOST").ok();
        let original_port = std::env::var("ROOMHUB_PORT").ok();

        std::env::set_var("ROOMHUB_HOST", "127.0.0.1");
        std::env::set_var("ROOMHUB_PORT", "6000");

        let mut config = Config::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 6000);

        std::env::set_var("ROOMHUB_PORT", "not-a-port");
        let mut config = Config::default();
        assert!(matches!(
            config.apply_env_overrides(),
            Err(RoomHubError::Config(_))
        ));

        match original_host {
            Some(val) => std::env::set_var("ROOMHUB_HOST", val),
            None => std::env::remove_var("ROOMHUB_HOST"),
        }
        match original_port {
            Some(val) => std::env::set_var("ROOMHUB_PORT", val),
            None => std::env::remove_var("ROOMHUB_PORT"),
        }
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_default_room() {
        let mut config = Config::default();
        config.chat.default_room = String::new();

        let result = config.validate();
        if let Err(RoomHubError::Validation(msg)) = result {
            assert!(msg.contains("default_room"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_validate_zero_capacity() {
        let mut config = Config::default();
        config.chat.outbound_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.chat.max_frame_bytes = 0;
        assert!(config.validate().is_err());
    }
}
