//! Still-image path: re-encode image bytes directly into WebP.

use std::io::Cursor;

use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use sk_core::{Error, Result};

/// Converts decoded-image bytes into the sticker raster format.
///
/// Implementations run on the blocking thread pool, so they may do CPU-heavy
/// work synchronously.
pub trait RasterEncoder: Send + Sync {
    /// Encode `input` (any supported still-image format) to WebP.
    fn encode(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Default encoder backed by the `image` crate.
///
/// Decodes the first frame of the input and writes it as a lossless WebP with
/// an RGBA pixel layout, so transparency survives.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebpEncoder;

impl RasterEncoder for WebpEncoder {
    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let decoded =
            image::load_from_memory(input).map_err(|e| Error::Encoding(e.to_string()))?;
        let rgba = decoded.to_rgba8();

        let mut out = Cursor::new(Vec::new());
        WebPEncoder::new_lossless(&mut out)
            .write_image(
                rgba.as_raw(),
                rgba.width(),
                rgba.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| Error::Encoding(e.to_string()))?;

        tracing::debug!(
            width = rgba.width(),
            height = rgba.height(),
            "encoded still image to webp"
        );
        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 128]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn png_becomes_webp_with_same_dimensions() {
        let webp = WebpEncoder.encode(&png(7, 5)).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");

        let back = image::load_from_memory_with_format(&webp, ImageFormat::WebP).unwrap();
        assert_eq!((back.width(), back.height()), (7, 5));
        assert_eq!(back.to_rgba8().get_pixel(0, 0), &Rgba([255, 0, 0, 128]));
    }

    #[test]
    fn corrupt_image_is_encoding_error() {
        // Valid PNG signature, garbage afterwards.
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&[0xEE; 32]);
        let err = WebpEncoder.encode(&data).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)), "unexpected error: {err}");
    }
}
