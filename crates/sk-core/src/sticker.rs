//! Per-call records: sticker pack metadata and conversion options.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pack/author/category information embedded into a finished sticker.
///
/// The pipeline passes this through verbatim; only the embedder looks at the
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StickerMetadata {
    pub pack_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Emoji categories for the sticker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Stable pack identifier. Derived from pack name and author at embed
    /// time when this is `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_id: Option<String>,
}

impl StickerMetadata {
    pub fn new(pack_name: impl Into<String>) -> Self {
        Self {
            pack_name: pack_name.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_pack_id(mut self, pack_id: impl Into<String>) -> Self {
        self.pack_id = Some(pack_id.into());
        self
    }
}

/// Options for a single `create_sticker` call.
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    /// Path to an ffmpeg-compatible transcoder. Required only for video input.
    pub transcoder_path: Option<PathBuf>,
    /// Metadata to embed into the result, if any.
    pub metadata: Option<StickerMetadata>,
    /// Directory for the transcode path's temporary files. Defaults to the
    /// platform temp directory.
    pub temp_dir: Option<PathBuf>,
    /// Upper bound on the transcoder's run time. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcoder(mut self, path: impl Into<PathBuf>) -> Self {
        self.transcoder_path = Some(path.into());
        self
    }

    pub fn with_metadata(mut self, metadata: StickerMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The directory temporary files should be created in.
    pub fn resolved_temp_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    pub fn transcoder(&self) -> Option<&Path> {
        self.transcoder_path.as_deref()
    }
}
