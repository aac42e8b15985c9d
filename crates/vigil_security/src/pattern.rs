//! Safe evaluation of rule patterns.
//!
//! Every pattern passes a safety screen before it is compiled: it must be
//! non-empty, at most [`MAX_PATTERN_LENGTH`] characters, parse, and be free
//! of the shapes known for catastrophic backtracking. The shapes are found
//! by walking the parsed syntax tree, so quantifier characters inside a
//! character class never count. A pattern that fails the screen never
//! matches anything; the matcher records it so the silent policy gap can be
//! found.
//!
//! Patterns are compiled with the linear-time `regex` engine when they can
//! be. Lookaround and backreferences fall back to `fancy_regex` with a
//! bounded backtracking budget; a search that exhausts the budget reports
//! no match.

use derive_getters::Getters;
use fancy_regex::Expr;
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use regex_syntax::ast::{self, Ast, RepetitionKind, RepetitionRange};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument, warn};
use vigil_error::{PatternError, PatternErrorKind};

/// Longest pattern the screen accepts, in characters.
pub const MAX_PATTERN_LENGTH: usize = 1000;

/// Backtracking steps one search may take in the fallback engine.
pub const BACKTRACK_LIMIT: usize = 100_000;

/// Compiled program size limit for a single pattern.
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Lazy DFA cache limit for a single pattern.
const DFA_SIZE_LIMIT: usize = 1 << 21;

/// Compiled patterns kept before the cache is flushed.
const CACHE_CAPACITY: usize = 1024;

/// More wildcard repetitions than this in one pattern is refused.
const MAX_WILDCARDS: usize = 2;

/// Screen a pattern without compiling it.
///
/// Checks emptiness and length, then parses the pattern and refuses nested
/// unbounded quantifiers, adjacent wildcard loops and more than two
/// wildcard loops. A pattern neither engine can parse is reported as a
/// compile failure.
pub fn validate_pattern(pattern: &str) -> Result<(), PatternError> {
    if pattern.is_empty() {
        return Err(PatternErrorKind::Empty.into());
    }

    let length = pattern.chars().count();
    if length > MAX_PATTERN_LENGTH {
        return Err(PatternErrorKind::TooLong {
            length,
            max: MAX_PATTERN_LENGTH,
        }
        .into());
    }

    let mut scan = ShapeScan::default();
    match ast::parse::Parser::new().parse(pattern) {
        Ok(tree) => scan.visit_ast(&tree, false),
        Err(linear_err) => match Expr::parse_tree(pattern) {
            Ok(tree) => scan.visit_expr(&tree.expr, false),
            Err(e) => {
                debug!(%pattern, linear = %linear_err, fallback = %e, "Pattern does not parse");
                return Err(PatternErrorKind::Compile(e.to_string()).into());
            }
        },
    }

    match scan.verdict() {
        Some(shape) => Err(PatternErrorKind::DangerousShape(shape.to_string()).into()),
        None => Ok(()),
    }
}

/// Shapes found while walking a parsed pattern.
#[derive(Debug, Default)]
struct ShapeScan {
    nested: bool,
    adjacent_wildcards: bool,
    wildcards: usize,
}

impl ShapeScan {
    fn verdict(&self) -> Option<&'static str> {
        if self.nested {
            Some("nested quantifier")
        } else if self.adjacent_wildcards {
            Some("adjacent wildcards")
        } else if self.wildcards > MAX_WILDCARDS {
            Some("repeated wildcards")
        } else {
            None
        }
    }

    fn visit_ast(&mut self, node: &Ast, in_loop: bool) {
        match node {
            Ast::Repetition(rep) => {
                let looping = is_loop(&rep.op.kind);
                if looping {
                    self.nested |= in_loop;
                    if matches!(*rep.ast, Ast::Dot(_)) {
                        self.wildcards += 1;
                    }
                }
                self.visit_ast(&rep.ast, in_loop || looping);
            }
            Ast::Group(group) => self.visit_ast(&group.ast, in_loop),
            Ast::Alternation(alt) => {
                for branch in &alt.asts {
                    self.visit_ast(branch, in_loop);
                }
            }
            Ast::Concat(concat) => {
                self.adjacent_wildcards |= concat
                    .asts
                    .windows(2)
                    .any(|pair| pair.iter().all(is_wildcard_loop));
                for item in &concat.asts {
                    self.visit_ast(item, in_loop);
                }
            }
            _ => {}
        }
    }

    fn visit_expr(&mut self, node: &Expr, in_loop: bool) {
        match node {
            Expr::Repeat { child, lo, hi, .. } => {
                let looping = *hi > *lo && *hi > 1;
                if looping {
                    self.nested |= in_loop;
                    if matches!(**child, Expr::Any { .. }) {
                        self.wildcards += 1;
                    }
                }
                self.visit_expr(child, in_loop || looping);
            }
            Expr::Group(child) => self.visit_expr(child, in_loop),
            Expr::LookAround(child, _) => self.visit_expr(child, in_loop),
            Expr::AtomicGroup(child) => self.visit_expr(child, in_loop),
            Expr::Concat(items) => {
                self.adjacent_wildcards |= items
                    .windows(2)
                    .any(|pair| pair.iter().all(is_wildcard_repeat));
                for item in items {
                    self.visit_expr(item, in_loop);
                }
            }
            Expr::Alt(branches) => {
                for branch in branches {
                    self.visit_expr(branch, in_loop);
                }
            }
            _ => {}
        }
    }
}

/// Whether a repetition can match its operand an unbounded or varying
/// number of times more than once. `?` and `{n}` are not loops.
fn is_loop(kind: &RepetitionKind) -> bool {
    match kind {
        RepetitionKind::ZeroOrOne => false,
        RepetitionKind::ZeroOrMore | RepetitionKind::OneOrMore => true,
        RepetitionKind::Range(RepetitionRange::Exactly(_)) => false,
        RepetitionKind::Range(RepetitionRange::AtLeast(_)) => true,
        RepetitionKind::Range(RepetitionRange::Bounded(lo, hi)) => hi > lo && *hi > 1,
    }
}

fn is_wildcard_loop(node: &Ast) -> bool {
    matches!(node, Ast::Repetition(rep) if is_loop(&rep.op.kind) && matches!(*rep.ast, Ast::Dot(_)))
}

fn is_wildcard_repeat(node: &Expr) -> bool {
    matches!(
        node,
        Expr::Repeat { child, lo, hi, .. } if hi > lo && matches!(**child, Expr::Any { .. })
    )
}

/// A screened pattern compiled for case-insensitive matching.
#[derive(Debug)]
pub enum CompiledPattern {
    /// Linear-time engine; used whenever the pattern allows it
    Linear(Regex),
    /// Backtracking engine for lookaround and backreferences, bounded by
    /// [`BACKTRACK_LIMIT`]
    Backtracking(fancy_regex::Regex),
}

impl CompiledPattern {
    /// First match as `(text, byte offset)`.
    ///
    /// A backtracking search that fails at runtime, including one that
    /// exhausts its budget, reports no match.
    pub fn find<'t>(&self, content: &'t str) -> Option<(&'t str, usize)> {
        match self {
            Self::Linear(regex) => regex.find(content).map(|m| (m.as_str(), m.start())),
            Self::Backtracking(regex) => match regex.find(content) {
                Ok(found) => found.map(|m| (m.as_str(), m.start())),
                Err(e) => {
                    debug!(pattern = regex.as_str(), error = %e, "Backtracking search abandoned");
                    None
                }
            },
        }
    }

    /// Whether the pattern matches anywhere in `content`.
    pub fn is_match(&self, content: &str) -> bool {
        self.find(content).is_some()
    }

    /// Whether the backtracking engine is in use.
    pub fn is_backtracking(&self) -> bool {
        matches!(self, Self::Backtracking(_))
    }
}

/// Screen and compile a pattern for case-insensitive matching.
///
/// # Examples
///
/// ```
/// use vigil_security::compile_pattern;
///
/// let linear = compile_pattern(r"free\s+money").unwrap();
/// assert!(!linear.is_backtracking());
///
/// let lookahead = compile_pattern(r"password(?=\s*:)").unwrap();
/// assert!(lookahead.is_backtracking());
/// assert_eq!(lookahead.find("Password: x"), Some(("Password", 0)));
/// ```
pub fn compile_pattern(pattern: &str) -> Result<CompiledPattern, PatternError> {
    validate_pattern(pattern)?;
    match build_case_insensitive(pattern) {
        Ok(regex) => Ok(CompiledPattern::Linear(regex)),
        Err(linear_err) => {
            debug!(%pattern, error = %linear_err, "Linear engine refused pattern, trying backtracking engine");
            build_backtracking(pattern)
                .map(CompiledPattern::Backtracking)
                .map_err(|e| PatternError::new(PatternErrorKind::Compile(e.to_string())))
        }
    }
}

fn build_case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .dfa_size_limit(DFA_SIZE_LIMIT)
        .build()
}

fn build_backtracking(pattern: &str) -> Result<fancy_regex::Regex, fancy_regex::Error> {
    fancy_regex::RegexBuilder::new(&format!("(?i){pattern}"))
        .backtrack_limit(BACKTRACK_LIMIT)
        .delegate_size_limit(REGEX_SIZE_LIMIT)
        .delegate_dfa_size_limit(DFA_SIZE_LIMIT)
        .build()
}

/// Case-insensitive literal containment of a user-supplied term.
///
/// The term is escaped so it is never interpreted as a pattern. If the
/// escaped term still fails to compile, falls back to a lowercase substring
/// check. An empty term matches nothing.
pub fn safe_string_match(content: &str, term: &str) -> bool {
    if content.is_empty() || term.is_empty() {
        return false;
    }
    match build_case_insensitive(&regex::escape(term)) {
        Ok(regex) => regex.is_match(content),
        Err(e) => {
            debug!(error = %e, "Escaped term failed to compile, using substring check");
            content.to_lowercase().contains(&term.to_lowercase())
        }
    }
}

/// Outcome of matching one pattern against content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct PatternMatch {
    /// The pattern that was tried
    pattern: String,
    /// Whether it matched
    matched: bool,
    /// Text of the first match
    matched_text: Option<String>,
    /// Byte offset of the first match
    position: Option<usize>,
}

impl PatternMatch {
    fn miss(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            matched: false,
            matched_text: None,
            position: None,
        }
    }

    fn hit(pattern: &str, text: &str, position: usize) -> Self {
        Self {
            pattern: pattern.to_string(),
            matched: true,
            matched_text: Some(text.to_string()),
            position: Some(position),
        }
    }

    /// Whether the pattern matched.
    pub fn is_match(&self) -> bool {
        self.matched
    }
}

/// A pattern the safety screen refused.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct RejectedPattern {
    /// The refused pattern
    pattern: String,
    /// Why it was refused
    reason: PatternErrorKind,
}

/// Matches patterns against content, screening and caching them.
///
/// Never fails: a pattern that cannot be used safely reports no match.
///
/// # Examples
///
/// ```
/// use vigil_security::PatternMatcher;
///
/// let matcher = PatternMatcher::new();
/// let found = matcher.match_pattern("Claim your FREE money", r"free\s+money");
/// assert!(found.is_match());
/// assert_eq!(found.matched_text().as_deref(), Some("FREE money"));
///
/// assert!(!matcher.match_pattern("aaaaaaaaaaaaaaaa!", "(a+)+$").is_match());
/// assert_eq!(matcher.rejection_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PatternMatcher {
    cache: RwLock<HashMap<String, Option<Arc<CompiledPattern>>>>,
    rejected: RwLock<Vec<RejectedPattern>>,
    rejections: AtomicU64,
}

impl PatternMatcher {
    /// Create a matcher with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match one pattern, reporting the first match.
    pub fn match_pattern(&self, content: &str, pattern: &str) -> PatternMatch {
        if content.is_empty() || pattern.is_empty() {
            return PatternMatch::miss(pattern);
        }
        let Some(compiled) = self.compiled(pattern) else {
            return PatternMatch::miss(pattern);
        };
        match compiled.find(content) {
            Some((text, position)) => PatternMatch::hit(pattern, text, position),
            None => PatternMatch::miss(pattern),
        }
    }

    /// Match every pattern, one result per pattern in input order.
    pub fn match_any_pattern<S: AsRef<str>>(
        &self,
        content: &str,
        patterns: &[S],
    ) -> Vec<PatternMatch> {
        patterns
            .iter()
            .map(|pattern| self.match_pattern(content, pattern.as_ref()))
            .collect()
    }

    /// Whether every pattern matches. Vacuously true for no patterns.
    pub fn match_all_patterns<S: AsRef<str>>(&self, content: &str, patterns: &[S]) -> bool {
        patterns
            .iter()
            .all(|pattern| self.match_pattern(content, pattern.as_ref()).is_match())
    }

    /// Whether at least one pattern matches.
    pub fn has_any_match<S: AsRef<str>>(&self, content: &str, patterns: &[S]) -> bool {
        patterns
            .iter()
            .any(|pattern| self.match_pattern(content, pattern.as_ref()).is_match())
    }

    /// First matching pattern, stopping at the first hit.
    pub fn first_match<S: AsRef<str>>(&self, content: &str, patterns: &[S]) -> Option<PatternMatch> {
        patterns
            .iter()
            .map(|pattern| self.match_pattern(content, pattern.as_ref()))
            .find(PatternMatch::is_match)
    }

    /// Case-insensitive literal containment; see [`safe_string_match`].
    pub fn safe_string_match(&self, content: &str, term: &str) -> bool {
        safe_string_match(content, term)
    }

    /// Patterns refused by the safety screen, each listed once.
    pub fn rejected_patterns(&self) -> Vec<RejectedPattern> {
        self.rejected.read().clone()
    }

    /// Number of times the safety screen has refused a pattern.
    pub fn rejection_count(&self) -> u64 {
        self.rejections.load(Ordering::Relaxed)
    }

    /// Number of screened patterns currently cached.
    pub fn cached_patterns(&self) -> usize {
        self.cache.read().len()
    }

    #[instrument(level = "trace", skip(self))]
    fn compiled(&self, pattern: &str) -> Option<Arc<CompiledPattern>> {
        if let Some(entry) = self.cache.read().get(pattern) {
            return entry.clone();
        }

        let entry = match compile_pattern(pattern) {
            Ok(compiled) => Some(Arc::new(compiled)),
            Err(e) => {
                self.record_rejection(pattern, e.kind);
                None
            }
        };

        let mut cache = self.cache.write();
        if cache.len() >= CACHE_CAPACITY {
            debug!(capacity = CACHE_CAPACITY, "Pattern cache full, flushing");
            cache.clear();
        }
        cache.insert(pattern.to_string(), entry.clone());
        entry
    }

    fn record_rejection(&self, pattern: &str, reason: PatternErrorKind) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
        let mut rejected = self.rejected.write();
        if rejected.iter().any(|r| r.pattern == pattern) {
            return;
        }
        warn!(%pattern, %reason, "Pattern refused by safety screen, it will never match");
        rejected.push(RejectedPattern::new(pattern.to_string(), reason));
    }
}
