//! Quiz configuration
//!
//! Settings are read from `quiz.toml` in the working directory when present
//! and fall back to defaults otherwise. Environment variables override the
//! file so a single run can point at another question set or font.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "quiz.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct QuizConfig {
    /// Question data source
    pub data: DataConfig,
    /// Window settings
    pub window: WindowConfig,
    /// Text rendering settings
    pub text: TextConfig,
    /// Result-screen animation and cursor trail
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// CSV file with a `Question,OptionA,OptionB,OptionC,Answer` header
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner size in logical pixels
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    /// Path to a .ttf/.otf font; the system sans-serif is used when unset
    pub font: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Animation time units per second (3.0 == 0.05 per frame at 60 fps)
    pub speed: f32,
    /// Number of pointer positions kept in the cursor trail
    pub trail_length: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("Q.csv") }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Quiz".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            trail_length: 20,
        }
    }
}

impl QuizConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `quiz.toml` in the current directory, or defaults.
    ///
    /// A missing file is silent; an unreadable or invalid one is logged.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        Self::load_from_file(path).unwrap_or_else(|e| {
            log::warn!("{}; using default configuration", e);
            Self::default()
        })
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn merge_with_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("QUIZ_DATA") {
            self.data.path = PathBuf::from(path);
        }
        if let Some(title) = lookup("QUIZ_TITLE") {
            self.window.title = title;
        }
        if let Some(font) = lookup("QUIZ_FONT") {
            self.text.font = Some(PathBuf::from(font));
        }
        if let Some(val) = lookup("QUIZ_ANIMATION_SPEED") {
            match val.parse::<f32>() {
                Ok(speed) if speed.is_finite() && speed >= 0.0 => self.animation.speed = speed,
                _ => log::warn!("ignoring invalid QUIZ_ANIMATION_SPEED={:?}", val),
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from quiz.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.data.path, PathBuf::from("Q.csv"));
        assert_eq!(config.animation.trail_length, 20);
        assert_eq!(config.animation.speed, 3.0);
        assert!(config.text.font.is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let config = QuizConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: QuizConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\npath = \"questions/geo.csv\"\n\n[window]\ntitle = \"Geography\"").unwrap();
        let config = QuizConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.data.path, PathBuf::from("questions/geo.csv"));
        assert_eq!(config.window.title, "Geography");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.animation, AnimationConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = \"wide\"").unwrap();
        assert!(matches!(
            QuizConfig::load_from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            QuizConfig::load_from_file(file.path().with_extension("missing")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_merge_with_vars() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("QUIZ_DATA", "other.csv"),
            ("QUIZ_FONT", "/fonts/NotoSans.ttf"),
            ("QUIZ_ANIMATION_SPEED", "1.5"),
        ]);
        let mut config = QuizConfig::default();
        config.merge_with_vars(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.data.path, PathBuf::from("other.csv"));
        assert_eq!(config.text.font, Some(PathBuf::from("/fonts/NotoSans.ttf")));
        assert_eq!(config.animation.speed, 1.5);
        assert_eq!(config.window.title, "Quiz");
    }

    #[test]
    fn test_invalid_speed_is_ignored() {
        let mut config = QuizConfig::default();
        config.merge_with_vars(|k| (k == "QUIZ_ANIMATION_SPEED").then(|| "fast".to_string()));
        assert_eq!(config.animation.speed, 3.0);
    }
}
