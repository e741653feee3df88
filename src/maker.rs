//! The conversion pipeline: normalize, detect, convert, embed.

use std::sync::Arc;

use bytes::Bytes;
use sk_av::StickerTranscoder;
use sk_core::{ConversionOptions, DetectedType, Error, MediaKind, Result};

use crate::embed::{ExifEmbedder, MetadataEmbedder};
use crate::encode::{RasterEncoder, WebpEncoder};
use crate::input::{normalize, RawInput};

/// Turns raw media into a finished sticker.
///
/// The raster encoder and metadata embedder are injectable; the defaults are
/// [`WebpEncoder`] and [`ExifEmbedder`]. A maker holds no per-call state, so
/// one instance can serve concurrent calls.
#[derive(Clone)]
pub struct StickerMaker {
    encoder: Arc<dyn RasterEncoder>,
    embedder: Arc<dyn MetadataEmbedder>,
}

impl Default for StickerMaker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StickerMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StickerMaker").finish_non_exhaustive()
    }
}

impl StickerMaker {
    pub fn new() -> Self {
        Self {
            encoder: Arc::new(WebpEncoder),
            embedder: Arc::new(ExifEmbedder),
        }
    }

    pub fn with_encoder(mut self, encoder: impl RasterEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    pub fn with_embedder(mut self, embedder: impl MetadataEmbedder + 'static) -> Self {
        self.embedder = Arc::new(embedder);
        self
    }

    /// Convert `input` into sticker bytes.
    ///
    /// Images are re-encoded in process. Videos are written to a temp file,
    /// transcoded by the configured binary, and read back; both temp files
    /// are gone by the time this returns. The result then passes through the
    /// embedder together with `options.metadata`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for empty or unreadable input.
    /// - [`Error::UnsupportedInput`] when the signature is neither image nor video.
    /// - [`Error::Configuration`] for video input without a transcoder path.
    /// - Encoder, transcoder, filesystem and embedder errors unchanged.
    #[tracing::instrument(skip_all)]
    pub async fn create(
        &self,
        input: impl Into<RawInput>,
        options: &ConversionOptions,
    ) -> Result<Vec<u8>> {
        let data = normalize(input.into()).await?;
        let detected = sk_probe::detect(&data);

        let raster = match detected.kind {
            MediaKind::Image => self.encode_image(data, &detected).await?,
            MediaKind::Video => transcode_video(&data, &detected, options).await?,
            MediaKind::Unknown => {
                tracing::debug!(ext = %detected.extension, "rejecting unsupported input");
                return Err(Error::UnsupportedInput(
                    "neither a valid image nor a video".into(),
                ));
            }
        };

        self.embedder
            .embed(raster, options.metadata.as_ref())
            .await
    }

    async fn encode_image(&self, data: Bytes, detected: &DetectedType) -> Result<Vec<u8>> {
        tracing::info!("encoding {} image ({} bytes)", detected.extension, data.len());
        let encoder = Arc::clone(&self.encoder);
        tokio::task::spawn_blocking(move || encoder.encode(&data))
            .await
            .map_err(|e| Error::Internal(format!("image encoder task failed: {e}")))?
    }
}

async fn transcode_video(
    data: &[u8],
    detected: &DetectedType,
    options: &ConversionOptions,
) -> Result<Vec<u8>> {
    let Some(program) = options.transcoder() else {
        return Err(Error::Configuration("transcoder path not specified".into()));
    };

    StickerTranscoder::new(program)
        .temp_dir(options.resolved_temp_dir())
        .timeout(options.timeout)
        .transcode(data, &detected.extension)
        .await
}
