//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! tool and sticker sections. Every section defaults sensibly so a completely
//! empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::sticker::{ConversionOptions, StickerMetadata};
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub sticker: StickerConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Configuration(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(path) = &self.tools.ffmpeg_path {
            if !path.exists() {
                warnings.push(format!(
                    "tools.ffmpeg_path {} does not exist; PATH lookup will be used",
                    path.display()
                ));
            }
        }

        if self.tools.timeout_secs == Some(0) {
            warnings.push("tools.timeout_secs is 0; every transcode will time out".into());
        }

        if let Some(dir) = &self.sticker.temp_dir {
            if !dir.is_dir() {
                warnings.push(format!("sticker.temp_dir {} is not a directory", dir.display()));
            }
        }

        if self.sticker.default_author.is_some() && self.sticker.default_pack.is_none() {
            warnings.push("sticker.default_author is set but default_pack is missing".into());
        }

        warnings
    }

    /// Build per-call options from this configuration.
    ///
    /// `transcoder` is the resolved transcoder path (usually from the tool
    /// registry). Metadata is only attached when a default pack name exists.
    pub fn conversion_options(&self, transcoder: Option<PathBuf>) -> ConversionOptions {
        let metadata = self.sticker.default_pack.as_ref().map(|pack| StickerMetadata {
            pack_name: pack.clone(),
            author: self.sticker.default_author.clone(),
            categories: None,
            pack_id: None,
        });

        ConversionOptions {
            transcoder_path: transcoder,
            metadata,
            temp_dir: self.sticker.temp_dir.clone(),
            timeout: self.tools.timeout(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// External tool overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg_path: Option<PathBuf>,
    /// Maximum transcoder run time in seconds. Absent means no limit.
    pub timeout_secs: Option<u64>,
}

impl ToolsConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Sticker output defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StickerConfig {
    pub temp_dir: Option<PathBuf>,
    pub default_pack: Option<String>,
    pub default_author: Option<String>,
}
