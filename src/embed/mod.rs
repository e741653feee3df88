//! Metadata attachment: embed sticker pack information into the final WebP.

pub mod exif;

use async_trait::async_trait;
use sk_core::{Error, Result, StickerMetadata};

pub use exif::derive_pack_id;

/// Attaches a metadata descriptor to finished raster bytes.
///
/// Implementations receive the descriptor verbatim and decide what to do
/// with it. `None` must be accepted. Errors returned here are surfaced to the
/// caller of the pipeline unchanged.
#[async_trait]
pub trait MetadataEmbedder: Send + Sync {
    async fn embed(&self, raster: Vec<u8>, metadata: Option<&StickerMetadata>)
        -> Result<Vec<u8>>;
}

/// Default embedder: writes the sticker-pack EXIF block into the WebP
/// container, replacing any existing EXIF chunk. Simple-format files are
/// promoted to the extended (VP8X) layout by the muxer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifEmbedder;

#[async_trait]
impl MetadataEmbedder for ExifEmbedder {
    async fn embed(
        &self,
        raster: Vec<u8>,
        metadata: Option<&StickerMetadata>,
    ) -> Result<Vec<u8>> {
        let Some(metadata) = metadata else {
            return Ok(raster);
        };

        let block = exif::build(metadata)?;
        let out = zenwebp::metadata::embed_exif(&raster, &block).map_err(container_error)?;
        tracing::debug!(
            pack = %metadata.pack_name,
            exif_bytes = block.len(),
            "embedded sticker metadata"
        );
        Ok(out)
    }
}

/// Read the sticker pack metadata embedded in a WebP file.
///
/// Returns `Ok(None)` for a valid WebP without sticker metadata.
pub fn read_sticker_metadata(webp: &[u8]) -> Result<Option<StickerMetadata>> {
    match zenwebp::metadata::exif(webp).map_err(container_error)? {
        Some(block) => exif::parse(&block),
        None => Ok(None),
    }
}

fn container_error(e: impl std::fmt::Display) -> Error {
    Error::Metadata(format!("invalid WebP container: {e}"))
}
