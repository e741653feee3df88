//! External tool detection and management.
//!
//! The [`ToolRegistry`] discovers and caches the location of the transcoder
//! (ffmpeg) and provides lookup methods for the CLI and pipeline callers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sk_core::config::ToolsConfig;

use crate::command::ToolCommand;

/// Name of the transcoder binary looked up on `PATH`.
pub const TRANSCODER: &str = "ffmpeg";

/// Known tool names that the registry manages.
const KNOWN_TOOLS: &[&str] = &[TRANSCODER];

/// Upper bound on a `-version` query.
const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Availability information for a tool, returned by [`ToolRegistry::check_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Whether the tool was found.
    pub available: bool,
    /// Version string (first line of `-version` output), if available.
    pub version: Option<String>,
    /// Resolved path to the executable.
    pub path: Option<PathBuf>,
}

/// Registry holding discovered tool paths.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, PathBuf>,
}

impl ToolRegistry {
    /// Discover tools by searching `PATH` (or using overrides from config).
    ///
    /// If the [`ToolsConfig`] supplies a custom transcoder path **and** that
    /// path exists, it is used directly. Otherwise [`which::which`] is used to
    /// locate the tool in `PATH`. Tools that are not found are silently
    /// omitted from the registry.
    pub fn discover(tools_config: &ToolsConfig) -> Self {
        let mut tools = HashMap::new();

        for &name in KNOWN_TOOLS {
            let custom_path = match name {
                TRANSCODER => tools_config.ffmpeg_path.as_deref(),
                _ => None,
            };

            let resolved = match custom_path {
                Some(p) if p.exists() => Some(p.to_path_buf()),
                Some(p) => {
                    tracing::warn!(
                        "configured {name} path {} does not exist; falling back to PATH",
                        p.display()
                    );
                    which::which(name).ok()
                }
                None => which::which(name).ok(),
            };

            if let Some(path) = resolved {
                tracing::debug!("resolved {name} at {}", path.display());
                tools.insert(name.to_string(), path);
            }
        }

        Self { tools }
    }

    /// Path of the transcoder, if one was found.
    pub fn transcoder_path(&self) -> Option<&Path> {
        self.tools.get(TRANSCODER).map(PathBuf::as_path)
    }

    /// Check all known tools and return availability information.
    ///
    /// Found tools are asked for their version with `-version`; a tool that
    /// exists but fails that query is still reported available.
    pub async fn check_all(&self) -> Vec<ToolInfo> {
        let mut infos = Vec::with_capacity(KNOWN_TOOLS.len());
        for &name in KNOWN_TOOLS {
            let info = match self.tools.get(name) {
                Some(path) => ToolInfo {
                    name: name.to_string(),
                    available: true,
                    version: detect_version(path).await,
                    path: Some(path.clone()),
                },
                None => ToolInfo {
                    name: name.to_string(),
                    available: false,
                    version: None,
                    path: None,
                },
            };
            infos.push(info);
        }
        infos
    }
}

/// Run `<tool> -version` and return the first line of stdout.
async fn detect_version(path: &Path) -> Option<String> {
    let mut cmd = ToolCommand::new(path.to_path_buf());
    cmd.arg("-version").timeout(Some(VERSION_TIMEOUT));

    match cmd.execute().await {
        Ok(output) => output.stdout.lines().next().map(str::to_string),
        Err(e) => {
            tracing::debug!("{} -version failed: {e}", path.display());
            None
        }
    }
}
