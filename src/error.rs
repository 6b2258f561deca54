//! Error types for chillbot.

/// Result type alias for chillbot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for chillbot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Labels file does not exist.
    #[error("labels file does not exist: {path}")]
    LabelsFileNotFound {
        /// Path to the missing labels file.
        path: std::path::PathBuf,
    },

    /// Failed to read labels file.
    #[error("failed to read labels file '{path}'")]
    LabelsRead {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The vocabulary has no labels.
    #[error("vocabulary is empty")]
    EmptyVocabulary,

    /// A score vector does not match the vocabulary size.
    #[error("score vector has {actual} entries, vocabulary has {expected}")]
    VectorLength {
        /// Vocabulary size.
        expected: usize,
        /// Length of the offending vector.
        actual: usize,
    },

    /// Classification was requested after the classifier was closed.
    #[error("classifier has been closed")]
    ClassifierClosed,

    /// The inference adapter failed to produce scores.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Failed to read a frames file.
    #[error("failed to read frames file '{path}'")]
    FramesRead {
        /// Path to the frames file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of a frames file could not be parsed.
    #[error("invalid frame at '{path}' line {line}: {reason}")]
    FrameParse {
        /// Path to the frames file.
        path: std::path::PathBuf,
        /// 1-based line number.
        line: usize,
        /// Description of the parse failure.
        reason: String,
    },

    /// Failed to read the result store.
    #[error("failed to read result store '{path}'")]
    StoreRead {
        /// Path to the store file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the result store.
    #[error("failed to parse result store '{path}'")]
    StoreParse {
        /// Path to the store file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize a stored record.
    #[error("failed to serialize result record")]
    StoreSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize a line of console output.
    #[error("failed to serialize output line")]
    OutputSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the result store.
    #[error("failed to write result store '{path}'")]
    StoreWrite {
        /// Path to the store file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The store holds no record under the requested key.
    #[error("no stored result under key '{key}'")]
    NoStoredResult {
        /// Store key that was looked up.
        key: String,
    },

    /// A drink name could not be mapped to a known drink.
    #[error("unknown drink: {name}")]
    UnknownDrink {
        /// The name as given.
        name: String,
    },
}

impl Error {
    /// Whether this error is a shape or settings mismatch rather than an I/O failure.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::VectorLength { .. } | Self::EmptyVocabulary | Self::ConfigValidation { .. }
        )
    }
}
