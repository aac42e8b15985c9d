//! Pattern screening error types.

/// Reasons a pattern is refused before it is ever evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PatternErrorKind {
    /// Pattern is empty
    #[display("Pattern is empty")]
    Empty,
    /// Pattern exceeds the maximum accepted length
    #[display("Pattern length {} exceeds maximum of {}", length, max)]
    TooLong {
        /// Length of the rejected pattern in characters
        length: usize,
        /// Maximum accepted length
        max: usize,
    },
    /// Pattern has a shape associated with catastrophic backtracking
    #[display("Pattern has a dangerous shape: {}", _0)]
    DangerousShape(String),
    /// Pattern failed to compile
    #[display("Pattern failed to compile: {}", _0)]
    Compile(String),
}

/// Pattern error with location tracking.
///
/// # Examples
///
/// ```
/// use vigil_error::{PatternError, PatternErrorKind};
///
/// let err = PatternError::new(PatternErrorKind::TooLong { length: 1200, max: 1000 });
/// assert!(format!("{}", err).contains("exceeds maximum"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pattern Error: {} at line {} in {}", kind, line, file)]
pub struct PatternError {
    /// The kind of error that occurred
    pub kind: PatternErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PatternError {
    /// Create a new pattern error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PatternErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PatternErrorKind {
        &self.kind
    }
}

impl From<PatternErrorKind> for PatternError {
    #[track_caller]
    fn from(kind: PatternErrorKind) -> Self {
        Self::new(kind)
    }
}
