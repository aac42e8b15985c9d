//! Detection of markup that could execute in a rendering surface.

use regex::Regex;
use std::sync::LazyLock;

/// Literal indicators, lowercase, including entity- and percent-encoded
/// spellings used to slip past a plain scan.
const MARKUP_INDICATORS: &[&str] = &[
    "<script",
    "</script",
    "javascript:",
    "vbscript:",
    "data:text/html",
    "<iframe",
    "<object",
    "<embed",
    "srcdoc=",
    "expression(",
    "&lt;script",
    "&#60;script",
    "&#060;script",
    "&#x3c;script",
    "&#x003c;script",
    "%3cscript",
    "\\u003cscript",
    "&#106;avascript",
    "&#x6a;avascript",
];

static EVENT_HANDLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bon(?:abort|blur|change|click|contextmenu|dblclick|drag[a-z]*|drop|error|focus(?:in|out)?|input|invalid|key(?:down|press|up)|load|mouse[a-z]+|pointer[a-z]+|reset|resize|scroll|select|submit|toggle|unload|wheel)\s*=",
    )
    .expect("event handler pattern compiles")
});

/// Scans text for script injection markup.
///
/// # Examples
///
/// ```
/// use vigil_security::MarkupScanner;
///
/// let scanner = MarkupScanner::new();
/// assert_eq!(
///     scanner.scan("<SCRIPT>alert(1)</SCRIPT>").as_deref(),
///     Some("<script")
/// );
/// assert!(scanner.scan("A picture of a sunset").is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupScanner;

impl MarkupScanner {
    /// Create a scanner.
    pub fn new() -> Self {
        Self
    }

    /// The first indicator found, or `None` for clean text.
    pub fn scan(&self, content: &str) -> Option<String> {
        let lower = content.to_lowercase();
        if let Some(indicator) = MARKUP_INDICATORS
            .iter()
            .find(|indicator| lower.contains(*indicator))
        {
            return Some(indicator.to_string());
        }
        EVENT_HANDLER
            .find(content)
            .map(|found| found.as_str().to_string())
    }

    /// Whether the content carries any indicator.
    pub fn is_malicious(&self, content: &str) -> bool {
        self.scan(content).is_some()
    }
}
