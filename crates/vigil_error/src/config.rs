//! Configuration error types.

/// Specific error conditions for moderation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// Failed to read the configuration file
    #[display("Failed to read config file: {}", _0)]
    FileRead(String),
    /// Failed to parse TOML content
    #[display("Failed to parse TOML: {}", _0)]
    TomlParse(String),
    /// A length limit is zero or otherwise unusable
    #[display("Invalid limit for '{}': {}", field, value)]
    InvalidLimit {
        /// Name of the offending limit
        field: String,
        /// Value that was supplied
        value: usize,
    },
    /// A protocol entry is not a valid URI scheme
    #[display("Invalid protocol '{}'", _0)]
    InvalidProtocol(String),
    /// A custom rule failed validation
    #[display("Invalid custom rule: {}", _0)]
    InvalidRule(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use vigil_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::InvalidLimit {
///     field: "max_text_length".to_string(),
///     value: 0,
/// });
/// assert!(format!("{}", err).contains("max_text_length"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The specific error condition
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
