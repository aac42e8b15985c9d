//! Content type tags for moderated payloads.

use serde::{Deserialize, Serialize};

/// The kind of payload handed to the engine.
///
/// Text and voice carry the content itself; image and video carry a URI
/// referencing it. Tags the engine does not recognize deserialize to
/// [`ContentType::Unknown`] and are allowed through unmoderated.
///
/// # Examples
///
/// ```
/// use vigil_core::ContentType;
///
/// let kind: ContentType = "Image".parse().unwrap();
/// assert_eq!(kind, ContentType::Image);
/// assert_eq!(kind.to_string(), "image");
/// assert!("hologram".parse::<ContentType>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentType {
    /// Plain text
    Text,
    /// Image reference (URI)
    Image,
    /// Video reference (URI)
    Video,
    /// Text destined for speech synthesis
    Voice,
    /// Any tag the engine does not understand
    #[serde(other)]
    Unknown,
}

impl ContentType {
    /// Every content type with a dedicated moderator.
    pub const SUPPORTED: [ContentType; 4] = [
        ContentType::Text,
        ContentType::Image,
        ContentType::Video,
        ContentType::Voice,
    ];

    /// Parse a tag, mapping anything unrecognized to [`ContentType::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or(ContentType::Unknown)
    }

    /// Whether the payload is a URI rather than the content itself.
    pub fn is_uri(&self) -> bool {
        matches!(self, ContentType::Image | ContentType::Video)
    }
}
