//! Configuration loading for the client.
//!
//! All client settings are loaded from a TOML configuration file. Every field
//! is optional; a missing file section falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::layout::GridLayout;

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Simulation server endpoints
    #[serde(default)]
    pub server: ServerConfig,
    /// Agent slot settings
    #[serde(default)]
    pub agents: AgentConfig,
    /// Grid-to-world placement
    #[serde(default)]
    pub layout: GridLayout,
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Simulation server endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// GET endpoint returning the next step
    pub step_url: String,
    /// POST endpoint that restarts the simulation
    pub reset_url: String,
    /// Per-request timeout; unset means wait indefinitely
    pub timeout_ms: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            step_url: "http://localhost:5000/step".to_string(),
            reset_url: "http://localhost:5000/reset".to_string(),
            timeout_ms: None,
        }
    }
}

/// Agent slot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Number of agent slots; ids above this are ignored
    pub count: usize,
    /// Hide agents missing from a step
    pub hide_absent: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            count: 6,
            hide_absent: false,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.server.step_url, "http://localhost:5000/step");
        assert_eq!(config.server.reset_url, "http://localhost:5000/reset");
        assert_eq!(config.server.timeout_ms, None);
        assert_eq!(config.agents.count, 6);
        assert!(!config.agents.hide_absent);
        assert_eq!(config.layout, GridLayout::default());
    }

    #[test]
    fn test_empty_string_is_default() {
        let config = ClientConfig::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
[server]
step_url = "http://sim:8000/step"

[agents]
hide_absent = true
"#;
        let config = ClientConfig::from_str(toml).unwrap();
        assert_eq!(config.server.step_url, "http://sim:8000/step");
        assert_eq!(config.server.reset_url, "http://localhost:5000/reset");
        assert_eq!(config.agents.count, 6);
        assert!(config.agents.hide_absent);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = ClientConfig::default();
        config.server.timeout_ms = Some(2500);
        config.agents.count = 4;

        let toml = config.to_toml().unwrap();
        let parsed = ClientConfig::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[agents]\ncount = 3").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.agents.count, 3);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ClientConfig::from_str("[agents]\ncount = \"many\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            ClientConfig::from_file(Path::new("/nonexistent/client.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
