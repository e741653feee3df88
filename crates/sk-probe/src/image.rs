//! Still-image signatures.

use sk_core::{DetectedType, MediaKind};

/// Fixed-offset image magic numbers: (offset, magic, extension, mime).
const IMAGE_MAGIC: &[(usize, &[u8], &str, &str)] = &[
    (0, &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A], "png", "image/png"),
    (0, &[0xFF, 0xD8, 0xFF], "jpg", "image/jpeg"),
    (0, b"GIF87a", "gif", "image/gif"),
    (0, b"GIF89a", "gif", "image/gif"),
    (0, b"II*\x00", "tif", "image/tiff"),
    (0, b"MM\x00*", "tif", "image/tiff"),
    (0, &[0x00, 0x00, 0x01, 0x00], "ico", "image/x-icon"),
    (0, b"BM", "bmp", "image/bmp"),
];

/// ISO-BMFF major brands that denote still images (AVIF/HEIF family).
///
/// The in-process raster encoder cannot decode these, so they are reported as
/// [`MediaKind::Unknown`] with extension and MIME filled in. Matching them here
/// still keeps them from being sniffed as MP4 video.
const STILL_BRANDS: &[(&[u8; 4], &str, &str)] = &[
    (b"avif", "avif", "image/avif"),
    (b"avis", "avif", "image/avif"),
    (b"heic", "heic", "image/heic"),
    (b"heix", "heic", "image/heic"),
    (b"mif1", "heic", "image/heif"),
    (b"msf1", "heic", "image/heif-sequence"),
];

/// Detect a still-image format, or `None` if `data` is not a known image.
///
/// AVIF/HEIF brands come back as `Some` with [`MediaKind::Unknown`].
pub fn detect_image(data: &[u8]) -> Option<DetectedType> {
    if is_webp(data) {
        return Some(DetectedType::new(MediaKind::Image, "webp", "image/webp"));
    }

    if let Some(brand) = ftyp_brand(data) {
        return STILL_BRANDS
            .iter()
            .find(|(b, _, _)| *b == brand)
            .map(|(_, ext, mime)| DetectedType::new(MediaKind::Unknown, ext, mime));
    }

    IMAGE_MAGIC
        .iter()
        .find(|(offset, magic, _, _)| matches_at(data, *offset, magic))
        .map(|(_, _, ext, mime)| DetectedType::new(MediaKind::Image, ext, mime))
}

fn is_webp(data: &[u8]) -> bool {
    matches_at(data, 0, b"RIFF") && matches_at(data, 8, b"WEBP")
}

/// Major brand of an ISO-BMFF `ftyp` box at the start of `data`.
pub(crate) fn ftyp_brand(data: &[u8]) -> Option<&[u8; 4]> {
    if !matches_at(data, 4, b"ftyp") {
        return None;
    }
    data.get(8..12)?.try_into().ok()
}

pub(crate) fn matches_at(data: &[u8], offset: usize, magic: &[u8]) -> bool {
    data.get(offset..offset + magic.len()) == Some(magic)
}
