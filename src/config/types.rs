//! Configuration type definitions.

use crate::constants::{DEFAULT_TOP_K, filter, store, thresholds};
use crate::inference::{ClassifierSettings, Thresholds};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Labels file, one label per line.
    pub labels: Option<PathBuf>,

    /// Smoothing filter settings.
    pub filter: FilterConfig,

    /// Top-K selection settings.
    pub selection: SelectionConfig,

    /// Decision rule thresholds.
    pub thresholds: ThresholdsConfig,

    /// Result store settings.
    pub store: StoreConfig,

    /// Output settings.
    pub output: OutputConfig,
}

impl Config {
    /// Classifier settings described by this configuration.
    pub fn classifier_settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            filter_stages: self.filter.stages,
            filter_factor: self.filter.factor,
            top_k: self.selection.top_k,
            thresholds: Thresholds {
                other: self.thresholds.other,
                perrier_ratio: self.thresholds.perrier_ratio,
                coke: self.thresholds.coke,
            },
        }
    }
}

/// Smoothing filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Number of cascaded low-pass stages.
    pub stages: usize,
    /// Smoothing factor (0 < factor < 1).
    pub factor: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            stages: filter::DEFAULT_STAGES,
            factor: filter::DEFAULT_FACTOR,
        }
    }
}

/// Top-K selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Number of labels handed to the decision rules.
    pub top_k: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Decision rule thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Minimum `other` confidence.
    pub other: f32,
    /// Minimum perrier/cocacola ratio.
    pub perrier_ratio: f32,
    /// Minimum `cocacola` confidence.
    pub coke: f32,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            other: thresholds::OTHER,
            perrier_ratio: thresholds::PERRIER_RATIO,
            coke: thresholds::COKE,
        }
    }
}

/// Result store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store file. Results are not persisted when unset.
    pub path: Option<PathBuf>,
    /// Key the record is written under.
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            key: store::DEFAULT_KEY.to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Per-frame output format.
    pub format: OutputFormat,
}

/// Supported per-frame output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable line per frame.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" | "jsonl" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
