//! # sk-probe
//!
//! Classifies a byte buffer as image, video, or unknown by inspecting its
//! binary signature. File names are never consulted.
//!
//! ```
//! use sk_core::MediaKind;
//!
//! let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
//! let detected = sk_probe::detect(&png);
//! assert_eq!(detected.kind, MediaKind::Image);
//! assert_eq!(detected.extension, "png");
//! ```

pub mod container;
pub mod image;

use sk_core::DetectedType;

/// Detect the content type of `data`.
///
/// Image signatures are checked before container signatures so that
/// ISO-BMFF still-image brands (AVIF, HEIC) and RIFF/WEBP are not mistaken for
/// video. Formats no conversion path can handle (audio, AVIF/HEIF) are
/// recognized but reported as
/// [`MediaKind::Unknown`](sk_core::MediaKind::Unknown) with their extension
/// and MIME filled in.
pub fn detect(data: &[u8]) -> DetectedType {
    let detected = image::detect_image(data)
        .or_else(|| container::detect_container(data))
        .unwrap_or_else(DetectedType::unknown);

    tracing::debug!(kind = %detected.kind, ext = %detected.extension, mime = %detected.mime, "detected content type");
    detected
}

/// Whether `data` carries a signature this crate can route to a conversion path.
pub fn is_supported(data: &[u8]) -> bool {
    let detected = detect(data);
    detected.is_image() || detected.is_video()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_core::MediaKind;

    #[test]
    fn plain_text_is_unknown() {
        let detected = detect(b"hello, this is definitely not media");
        assert_eq!(detected, DetectedType::unknown());
        assert!(!is_supported(b"hello"));
    }

    #[test]
    fn empty_is_unknown() {
        assert_eq!(detect(&[]).kind, MediaKind::Unknown);
    }

    #[test]
    fn webp_is_image_not_riff_video() {
        let mut webp = b"RIFF\x1a\x00\x00\x00WEBPVP8L".to_vec();
        webp.extend_from_slice(&[0; 8]);
        let detected = detect(&webp);
        assert_eq!(detected.kind, MediaKind::Image);
        assert_eq!(detected.extension, "webp");
    }

    #[test]
    fn avif_brand_is_recognized_but_unsupported() {
        let avif = b"\x00\x00\x00\x1cftypavif\x00\x00\x00\x00avifmif1";
        let detected = detect(avif);
        assert_eq!(detected.kind, MediaKind::Unknown);
        assert_eq!(detected.extension, "avif");
        assert_eq!(detected.mime, "image/avif");
        assert!(!is_supported(avif));
    }

    #[test]
    fn mp4_brand_is_video() {
        let mp4 = b"\x00\x00\x00\x18ftypisom\x00\x00\x02\x00isomiso2";
        let detected = detect(mp4);
        assert_eq!(detected.kind, MediaKind::Video);
        assert_eq!(detected.extension, "mp4");
        assert!(is_supported(mp4));
    }
}
