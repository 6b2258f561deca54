//! Application-wide constants.
//!
//! Default tunables, class label names and file names.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "chillbot";

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Smoothing filter defaults.
pub mod filter {
    /// Number of cascaded low-pass stages.
    pub const DEFAULT_STAGES: usize = 3;

    /// Shared smoothing factor, strictly between 0 and 1.
    pub const DEFAULT_FACTOR: f32 = 0.4;
}

/// Number of top-ranked labels handed to the decision engine.
pub const DEFAULT_TOP_K: usize = 3;

/// Decision rule thresholds.
pub mod thresholds {
    /// Minimum `other` confidence for the other-dominant rule.
    pub const OTHER: f32 = 0.10;

    /// Minimum perrier/cocacola confidence ratio for the co-occurrence rule.
    pub const PERRIER_RATIO: f32 = 0.10;

    /// Minimum `cocacola` confidence for the coke rule.
    pub const COKE: f32 = 0.05;
}

/// Vocabulary labels the decision engine looks for.
pub mod labels {
    /// Coca-Cola class label.
    pub const COCACOLA: &str = "cocacola";
    /// Perrier class label.
    pub const PERRIER: &str = "perrier";
    /// Catch-all class label.
    pub const OTHER: &str = "other";
}

/// Result store constants.
pub mod store {
    /// Key the drinks record is written under.
    pub const DEFAULT_KEY: &str = "drinks";

    /// Suffix of the temporary file used for atomic writes.
    pub const TEMP_SUFFIX: &str = ".tmp";
}

/// Number of decimal places when printing confidences.
pub const CONFIDENCE_DECIMAL_PLACES: usize = 2;
