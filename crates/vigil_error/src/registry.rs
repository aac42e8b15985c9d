//! Rule registry error types.

/// Kinds of rule registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RegistryErrorKind {
    /// Rule has an empty id
    #[display("Rule id must not be empty")]
    MissingId,
    /// Rule has an empty name
    #[display("Rule '{}' has an empty name", _0)]
    EmptyName(String),
    /// Rule applies to no content type
    #[display("Rule '{}' must apply to at least one content type", _0)]
    EmptyContentTypes(String),
}

/// Rule registry error with location tracking.
///
/// # Examples
///
/// ```
/// use vigil_error::{RegistryError, RegistryErrorKind};
///
/// let err = RegistryError::new(RegistryErrorKind::EmptyContentTypes("spam".to_string()));
/// assert!(format!("{}", err).contains("at least one content type"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Registry Error: {} at line {} in {}", kind, line, file)]
pub struct RegistryError {
    kind: RegistryErrorKind,
    line: u32,
    file: &'static str,
}

impl RegistryError {
    /// Create a new registry error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RegistryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RegistryErrorKind {
        &self.kind
    }
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
