//! Pattern safety and attack heuristics for the Vigil moderation engine.
//!
//! This crate owns everything that touches pattern matching directly:
//!
//! 1. **Pattern Matcher** - screens patterns for catastrophic-backtracking
//!    shapes and evaluates the survivors case-insensitively, on a bounded
//!    backtracking engine only when lookaround or backreferences need it
//! 2. **Markup Scanner** - finds script tags, event handlers and their
//!    encoded spellings
//! 3. **Prompt Injection Guard** - finds instruction-override attempts
//!
//! Nothing here returns an error on the matching path: an unusable pattern
//! simply never matches.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod injection;
mod markup;
mod pattern;

pub use injection::{InjectionFinding, InjectionLayer, PromptInjectionGuard};
pub use markup::MarkupScanner;
pub use pattern::{
    BACKTRACK_LIMIT, CompiledPattern, MAX_PATTERN_LENGTH, PatternMatch, PatternMatcher,
    RejectedPattern, compile_pattern, safe_string_match, validate_pattern,
};
