//! Media-domain types produced by content detection.
//!
//! Enums serialize in lowercase (via `serde(rename_all = "lowercase")`) and
//! implement `Display` manually for consistent string representation.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// MediaKind
// ---------------------------------------------------------------------------

/// Broad content category of an input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Unknown,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// DetectedType
// ---------------------------------------------------------------------------

/// Result of signature-based content detection.
///
/// `extension` is always lowercase and has no leading dot. Both `extension`
/// and `mime` are empty when no signature matched; recognized formats that are
/// neither image nor video (audio) keep theirs under [`MediaKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedType {
    pub kind: MediaKind,
    pub extension: String,
    pub mime: String,
}

impl DetectedType {
    /// Build a detected type, lowercasing the extension.
    pub fn new(kind: MediaKind, extension: &str, mime: &str) -> Self {
        Self {
            kind,
            extension: extension.to_ascii_lowercase(),
            mime: mime.to_string(),
        }
    }

    /// The type returned when no signature matches.
    pub fn unknown() -> Self {
        Self {
            kind: MediaKind::Unknown,
            extension: String::new(),
            mime: String::new(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

impl fmt::Display for DetectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MediaKind::Unknown => write!(f, "unknown"),
            _ => write!(f, "{} ({}, .{})", self.kind, self.mime, self.extension),
        }
    }
}
