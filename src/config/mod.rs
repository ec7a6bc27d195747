use crate::tui::styles::Theme;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Longest accepted tick interval
const MAX_TICK_RATE_MS: u64 = 1000;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown theme '{0}', expected one of: dark, light")]
    UnknownTheme(String),

    #[error("tick_rate_ms must be between 1 and 1000, got {0}")]
    InvalidTickRate(u64),

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color theme name
    pub theme: String,

    /// Capture mouse input so buttons can be clicked
    pub mouse_capture: bool,

    /// Interval between tick events, in milliseconds
    pub tick_rate_ms: u64,

    /// Dim the screen behind an open dialog
    pub backdrop_dim: bool,

    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse_capture: true,
            tick_rate_ms: 100,
            backdrop_dim: true,
            log_file: None,
        }
    }
}

impl Config {
    /// Initialize configuration from various sources
    pub async fn init() -> Result<Self> {
        let mut config = match Self::load_from_file(&Self::config_paths()).await? {
            Some(file_config) => file_config,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Candidate configuration files, highest priority first
    pub fn config_paths() -> Vec<PathBuf> {
        let mut config_paths = vec![
            PathBuf::from("./.modal-dialog.json"),
            PathBuf::from("./modal-dialog.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("modal-dialog").join("config.json"));
        }

        config_paths
    }

    /// Load the first configuration file that exists
    pub async fn load_from_file(paths: &[PathBuf]) -> Result<Option<Self>, ConfigError> {
        for path in paths {
            if path.exists() {
                debug!("Loading configuration from: {}", path.display());
                return Self::parse_file(path).await.map(Some);
            }
        }
        Ok(None)
    }

    async fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override settings from environment variables looked up through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(theme) = lookup("MODAL_DIALOG_THEME") {
            self.theme = theme;
        }

        if let Some(mouse) = lookup("MODAL_DIALOG_MOUSE") {
            self.mouse_capture = parse_flag(&mouse).unwrap_or(self.mouse_capture);
        }

        if let Some(tick_rate) = lookup("MODAL_DIALOG_TICK_RATE_MS") {
            if let Ok(tick_rate) = tick_rate.parse() {
                self.tick_rate_ms = tick_rate;
            }
        }

        if let Some(dim) = lookup("MODAL_DIALOG_BACKDROP_DIM") {
            self.backdrop_dim = parse_flag(&dim).unwrap_or(self.backdrop_dim);
        }

        if let Some(log_file) = lookup("MODAL_DIALOG_LOG_FILE") {
            self.log_file = Some(PathBuf::from(log_file));
        }
    }

    /// Resolve the configured theme
    pub fn theme(&self) -> Result<Theme, ConfigError> {
        Theme::by_name(&self.theme).ok_or_else(|| ConfigError::UnknownTheme(self.theme.clone()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.theme()?;

        if self.tick_rate_ms == 0 || self.tick_rate_ms > MAX_TICK_RATE_MS {
            return Err(ConfigError::InvalidTickRate(self.tick_rate_ms));
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.theme().unwrap(), Theme::dark());
    }

    #[test]
    fn test_validation_errors() {
        let config = Config {
            theme: "neon".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::UnknownTheme(name)) if name == "neon"));

        let config = Config {
            tick_rate_ms: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTickRate(0))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("MODAL_DIALOG_THEME", "light"),
            ("MODAL_DIALOG_MOUSE", "off"),
            ("MODAL_DIALOG_TICK_RATE_MS", "250"),
            ("MODAL_DIALOG_BACKDROP_DIM", "maybe"),
            ("MODAL_DIALOG_LOG_FILE", "/tmp/modal-dialog.log"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.theme, "light");
        assert!(!config.mouse_capture);
        assert_eq!(config.tick_rate_ms, 250);
        // unparseable flags keep the previous value
        assert!(config.backdrop_dim);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/modal-dialog.log")));
    }

    #[tokio::test]
    async fn test_load_first_existing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let present = dir.path().join("config.json");
        std::fs::write(&present, r#"{ "theme": "light", "backdrop_dim": false }"#).unwrap();

        let config = Config::load_from_file(&[missing, present])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(config.theme, "light");
        assert!(!config.backdrop_dim);
        // unspecified fields fall back to defaults
        assert_eq!(config.tick_rate_ms, 100);
        assert!(config.mouse_capture);
    }

    #[tokio::test]
    async fn test_load_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from_file(&[path.clone()]).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: ref p, .. } if *p == path));
    }

    #[tokio::test]
    async fn test_no_file_found() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_file(&[dir.path().join("none.json")])
            .await
            .unwrap();
        assert!(config.is_none());
    }
}
