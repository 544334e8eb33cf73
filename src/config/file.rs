//! TOML configuration files.

use super::CameraConfig;
use crate::constants::Constants;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration loading errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
///
/// ```toml
/// [camera]
/// aspect = "fit"
/// capture_mode = "video"
///
/// [constants.capture_mode]
/// still = 0
/// video = 1
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// View configuration.
    #[serde(default)]
    pub camera: CameraConfig,
    /// Overrides the platform's enumeration table when present.
    #[serde(default)]
    pub constants: Option<Constants>,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModeValue;
    use crate::constants::Category;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config.camera.aspect, Some(ModeValue::name("fill")));
        assert!(config.constants.is_none());
    }

    #[test]
    fn test_camera_and_constants_sections() {
        let config = FileConfig::from_toml(
            r#"
            [camera]
            capture_mode = "video"
            torch_mode = 1

            [camera.style]
            flex = 1

            [constants.capture_mode]
            still = 10
            video = 11
            "#,
        )
        .unwrap();

        assert_eq!(config.camera.capture_mode, Some(ModeValue::name("video")));
        assert_eq!(config.camera.torch_mode, Some(ModeValue::Code(1)));
        assert_eq!(config.camera.style.get("flex"), Some(&serde_json::json!(1)));

        let constants = config.constants.unwrap();
        assert_eq!(constants.code(Category::CaptureMode, "video"), Some(11));
    }

    #[test]
    fn test_malformed_file() {
        let result = FileConfig::from_toml("[camera\naspect = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = FileConfig::from_file("/nonexistent/camera.toml");
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }
}
