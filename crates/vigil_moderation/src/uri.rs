//! Structural URI validation shared by the image and video moderators.

use crate::SuggestionResolver;
use crate::config::DEFAULT_MAX_URI_LENGTH;
use std::collections::BTreeSet;
use tracing::debug;
use vigil_core::{VALIDATION_SENTINEL, Violation, ViolationType};

/// Whether `scheme` is a syntactically valid URI scheme.
///
/// A scheme starts with an ASCII letter followed by letters, digits,
/// `+`, `-` or `.`.
pub fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Lowercased scheme of `uri`, if it has a syntactically valid one.
///
/// The scheme ends at the first `:`.
pub fn scheme_of(uri: &str) -> Option<String> {
    let (scheme, _) = uri.trim().split_once(':')?;
    is_valid_scheme(scheme).then(|| scheme.to_ascii_lowercase())
}

/// Length limit and protocol allow-list for one URI content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriPolicy {
    max_uri_length: usize,
    allowed_protocols: BTreeSet<String>,
    suggestions: SuggestionResolver,
}

impl UriPolicy {
    /// Policy with the default length limit and the given protocols.
    pub fn new<I, S>(protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = Self {
            max_uri_length: DEFAULT_MAX_URI_LENGTH,
            allowed_protocols: BTreeSet::new(),
            suggestions: SuggestionResolver::new(),
        };
        policy.set_allowed_protocols(protocols);
        policy
    }

    /// Maximum accepted URI length in characters.
    pub fn max_uri_length(&self) -> usize {
        self.max_uri_length
    }

    /// Allowed schemes, lowercased.
    pub fn allowed_protocols(&self) -> &BTreeSet<String> {
        &self.allowed_protocols
    }

    /// Set the maximum accepted URI length in characters.
    pub fn set_max_uri_length(&mut self, max_uri_length: usize) {
        self.max_uri_length = max_uri_length;
    }

    /// Replace the allow-list. Entries are normalized: lowercased with any
    /// trailing `:` removed.
    pub fn set_allowed_protocols<I, S>(&mut self, protocols: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_protocols = protocols
            .into_iter()
            .map(|p| p.as_ref().trim().trim_end_matches(':').to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
    }

    /// Mutable access to the suggestion overrides.
    pub fn suggestions_mut(&mut self) -> &mut SuggestionResolver {
        &mut self.suggestions
    }

    /// First structural failure for `uri`, if any.
    ///
    /// Checks run in order: emptiness, length, scheme.
    pub fn check(&self, uri: &str) -> Option<Violation> {
        if uri.trim().is_empty() {
            return Some(self.violation(
                "empty-uri",
                "Empty URI",
                uri,
                "Please provide a URI for the media.".to_string(),
            ));
        }
        if uri.chars().count() > self.max_uri_length {
            return Some(self.violation(
                "uri-too-long",
                "URI too long",
                uri,
                format!(
                    "Please use a URI of at most {} characters.",
                    self.max_uri_length
                ),
            ));
        }
        match scheme_of(uri) {
            Some(scheme) if self.allowed_protocols.contains(&scheme) => None,
            scheme => {
                debug!(?scheme, "URI scheme not allowed");
                let allowed = self
                    .allowed_protocols
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(self.violation(
                    "invalid-protocol",
                    "Invalid protocol",
                    uri,
                    format!("Please use a URI with one of these protocols: {allowed}."),
                ))
            }
        }
    }

    fn violation(&self, rule_id: &str, rule_name: &str, uri: &str, specific: String) -> Violation {
        Violation::structural(
            rule_id,
            rule_name,
            ViolationType::DangerousContent,
            VALIDATION_SENTINEL,
            uri,
            self.suggestions
                .resolve_or(ViolationType::DangerousContent, &specific),
        )
    }
}
