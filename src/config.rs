//! Application configuration. Artifact locations are fixed at deploy time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the five fitted artifacts live
    pub artifacts: ArtifactsConfig,
    /// Reference dataset used for input-vs-training distribution insights
    pub reference: ReferenceConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory holding the artifact files
    pub dir: PathBuf,
    pub scaler: String,
    pub power_transformer: String,
    pub polynomial: String,
    pub model: String,
    pub label_encoder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub enabled: bool,
    pub url: String,
    /// Upper bound on the whole fetch (seconds)
    pub timeout_secs: u64,
    /// Features summarized against the user's input
    pub key_features: Vec<String>,
    /// Histogram bin count
    pub bins: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig::default(),
            reference: ReferenceConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            scaler: "standard_scaler.json".to_string(),
            power_transformer: "power_transformer.json".to_string(),
            polynomial: "polynomial_features.json".to_string(),
            model: "model_rf.json".to_string(),
            label_encoder: "label_encoder.json".to_string(),
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://drive.google.com/uc?id=1BYbbHENjD7sVotwaggdkQTsW9wyiQc1S".to_string(),
            timeout_secs: 10,
            key_features: ["temp", "humidity", "precip", "cases"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            bins: 20,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ArtifactsConfig {
    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(&self.scaler)
    }

    pub fn power_transformer_path(&self) -> PathBuf {
        self.dir.join(&self.power_transformer)
    }

    pub fn polynomial_path(&self) -> PathBuf {
        self.dir.join(&self.polynomial)
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model)
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.dir.join(&self.label_encoder)
    }

    /// Same config rooted at another directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<AppConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
