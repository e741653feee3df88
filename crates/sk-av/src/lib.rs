//! # sk-av
//!
//! External transcoder orchestration for the stickerkit pipeline.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache the path to an
//!   ffmpeg-compatible transcoder.
//! - **Command execution** ([`ToolCommand`]) -- async builder with optional
//!   timeout for running external processes.
//! - **Temp-file lifecycle** ([`TempFilePair`]) -- uniquely named input/output
//!   paths that are removed on every exit path.
//! - **Actions** ([`actions`]) -- the video-to-sticker transcode.

pub mod actions;
pub mod command;
pub mod tools;
pub mod workspace;

// ---- Re-exports for convenience ----

pub use actions::{sticker_args, StickerTranscoder};
pub use command::{ToolCommand, ToolOutput};
pub use tools::{ToolInfo, ToolRegistry, TRANSCODER};
pub use workspace::TempFilePair;
