//! Error types for the Vigil content moderation engine.
//!
//! Every error records the source location it was created at. Moderation
//! verdicts are never errors; these types cover configuration, rule
//! registration and direct use of the pattern-safety screen.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod pattern;
mod registry;

pub use config::{ConfigError, ConfigErrorKind};
pub use pattern::{PatternError, PatternErrorKind};
pub use registry::{RegistryError, RegistryErrorKind, RegistryResult};

/// Aggregate of every error the engine can report.
#[derive(Debug, Clone, derive_more::Display, derive_more::From, derive_more::Error)]
pub enum VigilErrorKind {
    /// Configuration loading or validation failed
    Config(ConfigError),
    /// A pattern was refused by the safety screen
    Pattern(PatternError),
    /// A rule registry operation failed
    Registry(RegistryError),
}

/// Top-level error type.
///
/// # Examples
///
/// ```
/// use vigil_error::{RegistryError, RegistryErrorKind, VigilError, VigilErrorKind};
///
/// let err = VigilError::from(RegistryError::new(RegistryErrorKind::MissingId));
/// assert!(matches!(err.kind(), VigilErrorKind::Registry(_)));
/// assert!(format!("{}", err).contains("Vigil Error"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Vigil Error: {}", _0)]
pub struct VigilError(VigilErrorKind);

impl VigilError {
    /// Create a new error from its kind.
    pub fn new(kind: VigilErrorKind) -> Self {
        Self(kind)
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VigilErrorKind {
        &self.0
    }
}

impl<T> From<T> for VigilError
where
    T: Into<VigilErrorKind>,
{
    fn from(err: T) -> Self {
        Self(err.into())
    }
}

/// Result alias used across the workspace.
pub type VigilResult<T> = Result<T, VigilError>;
