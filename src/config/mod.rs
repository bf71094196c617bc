//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::PointSystem;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Defaults applied when a tournament is first created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentDefaults {
    #[serde(default = "default_tournament_name")]
    pub default_name: String,

    #[serde(default = "default_points_win")]
    pub points_win: i32,

    #[serde(default = "default_points_draw")]
    pub points_draw: i32,

    #[serde(default = "default_points_loss")]
    pub points_loss: i32,
}

fn default_tournament_name() -> String {
    "PAPI FÚTBOL ROLÓN".to_string()
}

fn default_points_win() -> i32 {
    PointSystem::default().win
}

fn default_points_draw() -> i32 {
    PointSystem::default().draw
}

fn default_points_loss() -> i32 {
    PointSystem::default().loss
}

impl Default for TournamentDefaults {
    fn default() -> Self {
        Self {
            default_name: default_tournament_name(),
            points_win: default_points_win(),
            points_draw: default_points_draw(),
            points_loss: default_points_loss(),
        }
    }
}

impl TournamentDefaults {
    pub fn point_system(&self) -> PointSystem {
        PointSystem::new(self.points_win, self.points_draw, self.points_loss)
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tournament: TournamentDefaults,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            tournament: TournamentDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.tournament.default_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Default tournament name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.tournament.point_system(), PointSystem::new(3, 1, 0));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::from_toml(
            r#"
            data_dir = "/srv/scoreboard"

            [tournament]
            points_win = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/scoreboard"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.tournament.point_system(), PointSystem::new(2, 1, 0));
        assert_eq!(config.tournament.default_name, "PAPI FÚTBOL ROLÓN");
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_blank_name() {
        let mut config = AppConfig::default();
        config.tournament.default_name = "   ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("server = 12"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.server.port, 9000);

        let missing = AppConfig::from_file(&temp_dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.tournament.points_win, parsed.tournament.points_win);
    }
}
