//! sk-core: shared errors, configuration, and media-domain types.
//!
//! This crate is the foundational dependency for the other sk-* crates,
//! providing the unified error type, the sticker metadata and conversion
//! option records, detected media types, and application configuration.

pub mod config;
pub mod error;
pub mod media;
pub mod sticker;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result, TranscodeFailure};
pub use media::*;
pub use sticker::{ConversionOptions, StickerMetadata};
