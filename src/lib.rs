//! Stickerkit - turn images and short videos into WebP stickers
//!
//! Input is normalized to a byte buffer, classified by its binary signature,
//! then either re-encoded in process (images) or transcoded by an external
//! ffmpeg-compatible binary (videos). The result carries sticker pack
//! metadata when a descriptor is supplied.

pub mod embed;
pub mod encode;
pub mod input;
pub mod maker;

pub use embed::{read_sticker_metadata, ExifEmbedder, MetadataEmbedder};
pub use encode::{RasterEncoder, WebpEncoder};
pub use input::RawInput;
pub use maker::StickerMaker;
pub use sk_core::{ConversionOptions, Error, Result, StickerMetadata};

/// Convert `input` into sticker bytes with the default encoder and embedder.
///
/// See [`StickerMaker::create`] for the error contract.
pub async fn create_sticker(
    input: impl Into<RawInput>,
    options: &ConversionOptions,
) -> Result<Vec<u8>> {
    StickerMaker::new().create(input, options).await
}
