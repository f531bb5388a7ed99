//! Configuration for gesturedrop.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default proximity threshold in pixels.
pub const DEFAULT_THRESHOLD: f64 = 45.0;

/// Fingertip indices of the 21-point hand skeleton convention.
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// An unordered pair of fingertip indices compared for proximity each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProximityPair(pub usize, pub usize);

impl ProximityPair {
    pub fn new(a: usize, b: usize) -> Self {
        Self(a, b)
    }
}

impl std::fmt::Display for ProximityPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// The default pair set: thumb against each finger, plus the adjacent
/// finger pairs and index-pinky.
pub fn default_proximity_pairs() -> Vec<ProximityPair> {
    vec![
        ProximityPair(THUMB_TIP, INDEX_TIP),
        ProximityPair(THUMB_TIP, MIDDLE_TIP),
        ProximityPair(THUMB_TIP, RING_TIP),
        ProximityPair(THUMB_TIP, PINKY_TIP),
        ProximityPair(INDEX_TIP, MIDDLE_TIP),
        ProximityPair(MIDDLE_TIP, RING_TIP),
        ProximityPair(RING_TIP, PINKY_TIP),
        ProximityPair(INDEX_TIP, PINKY_TIP),
    ]
}

fn default_fingertips() -> Vec<usize> {
    vec![THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP]
}

/// Gesture recognition parameters.
///
/// Validated at session construction; every subsequent frame's semantics
/// depend on these, so an invalid configuration must never be instantiated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Pixel distance below which two fingertips count as touching.
    /// Strict comparison: a distance exactly equal is not "close".
    pub threshold: f64,

    /// Fingertip keypoint indices. Overridable for alternative skeleton
    /// conventions; only used by callers that render overlay points.
    #[serde(default = "default_fingertips")]
    pub fingertips: Vec<usize>,

    /// The fixed pair set checked each frame.
    #[serde(default = "default_proximity_pairs")]
    pub proximity_pairs: Vec<ProximityPair>,

    /// Opaque identifier for the tracked subject, routed into emitted
    /// transitions; not interpreted by the core.
    #[serde(default)]
    pub subject: Option<String>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fingertips: default_fingertips(),
            proximity_pairs: default_proximity_pairs(),
            subject: None,
        }
    }
}

impl GestureConfig {
    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::InvalidConfig(format!(
                "threshold must be a positive finite number, got {}",
                self.threshold
            )));
        }
        if self.proximity_pairs.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "proximity pair list must not be empty".to_string(),
            ));
        }
        for pair in &self.proximity_pairs {
            if pair.0 == pair.1 {
                return Err(ConfigError::InvalidConfig(format!(
                    "proximity pair {pair} compares a fingertip with itself"
                )));
            }
        }
        Ok(())
    }
}

/// Main configuration for the gesturedrop CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gesture recognition parameters.
    pub gesture: GestureConfig,

    /// Path for exporting session reports.
    pub export_path: PathBuf,

    /// Path for storing session stats.
    pub data_path: PathBuf,

    /// Milliseconds between replayed frames (0 = as fast as possible).
    pub frame_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gesturedrop");

        Self {
            gesture: GestureConfig::default(),
            export_path: data_dir.join("exports"),
            data_path: data_dir,
            frame_interval_ms: 0,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gesturedrop")
            .join("config.json")
    }

    /// Ensure all required directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.export_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        std::fs::create_dir_all(&self.data_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    InvalidConfig(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
            ConfigError::InvalidConfig(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GestureConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.threshold, 45.0);
        assert_eq!(config.proximity_pairs.len(), 8);
        assert_eq!(config.fingertips.len(), 5);
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        let mut config = GestureConfig::default();
        config.threshold = 0.0;
        assert!(config.validate().is_err());

        config.threshold = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        let mut config = GestureConfig::default();
        config.threshold = f64::NAN;
        assert!(config.validate().is_err());

        config.threshold = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_pair_list_rejected() {
        let mut config = GestureConfig::default();
        config.proximity_pairs.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_pair_rejected() {
        let mut config = GestureConfig::default();
        config.proximity_pairs.push(ProximityPair(4, 4));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_pairs_match_skeleton_convention() {
        let pairs = default_proximity_pairs();
        assert!(pairs.contains(&ProximityPair(THUMB_TIP, INDEX_TIP)));
        assert!(pairs.contains(&ProximityPair(INDEX_TIP, PINKY_TIP)));
    }
}
