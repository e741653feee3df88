//! Video container detection from magic bytes.
//!
//! Audio-only containers are recognized too so callers get a precise
//! extension/MIME in error messages, but they are tagged
//! [`MediaKind::Unknown`] since no conversion path accepts them.

use sk_core::{DetectedType, MediaKind};

use crate::image::{ftyp_brand, matches_at};

/// EBML header ID that starts every Matroska/WebM file.
const EBML_MAGIC: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];

/// ASF header object GUID (WMV/WMA).
const ASF_MAGIC: [u8; 8] = [0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11];

/// MPEG transport stream packet size.
const TS_PACKET: usize = 188;

/// How far into an EBML header to look for the doctype string.
const EBML_DOCTYPE_WINDOW: usize = 64;

/// Detect a video (or audio-only) container, or `None` if unrecognized.
pub fn detect_container(data: &[u8]) -> Option<DetectedType> {
    // Matroska/WebM: the doctype element decides the flavour.
    if matches_at(data, 0, &EBML_MAGIC) {
        let window = &data[..data.len().min(EBML_DOCTYPE_WINDOW)];
        return Some(if contains(window, b"webm") {
            video("webm", "video/webm")
        } else {
            video("mkv", "video/x-matroska")
        });
    }

    if let Some(brand) = ftyp_brand(data) {
        return Some(from_brand(brand));
    }

    // Some QuickTime files start with a non-ftyp atom.
    if [b"moov", b"mdat", b"free", b"wide"]
        .iter()
        .any(|atom| matches_at(data, 4, &atom[..]))
    {
        return Some(video("mov", "video/quicktime"));
    }

    if matches_at(data, 0, b"RIFF") {
        if matches_at(data, 8, b"AVI ") {
            return Some(video("avi", "video/vnd.avi"));
        }
        if matches_at(data, 8, b"WAVE") {
            return Some(audio("wav", "audio/wav"));
        }
        return None;
    }

    if matches_at(data, 0, b"FLV\x01") {
        return Some(video("flv", "video/x-flv"));
    }

    if matches_at(data, 0, &ASF_MAGIC) {
        return Some(video("asf", "video/x-ms-asf"));
    }

    // MPEG program stream pack header or elementary video sequence header.
    if matches_at(data, 0, &[0x00, 0x00, 0x01, 0xBA]) || matches_at(data, 0, &[0x00, 0x00, 0x01, 0xB3])
    {
        return Some(video("mpg", "video/mpeg"));
    }

    // MPEG-TS: sync byte repeated at packet boundaries.
    if data.len() > TS_PACKET && data[0] == 0x47 && data[TS_PACKET] == 0x47 {
        return Some(video("mts", "video/mp2t"));
    }

    if matches_at(data, 0, b"OggS") {
        return Some(from_ogg(data));
    }

    if matches_at(data, 0, b"fLaC") {
        return Some(audio("flac", "audio/x-flac"));
    }

    if matches_at(data, 0, b"ID3") || is_mp3_frame(data) {
        return Some(audio("mp3", "audio/mpeg"));
    }

    None
}

fn from_brand(brand: &[u8; 4]) -> DetectedType {
    match brand {
        b"qt  " => video("mov", "video/quicktime"),
        b"M4V " | b"M4VH" | b"M4VP" => video("m4v", "video/x-m4v"),
        b"M4A " | b"M4B " | b"M4P " => audio("m4a", "audio/mp4"),
        [b'3', b'g', b'2', _] => video("3g2", "video/3gpp2"),
        [b'3', b'g', _, _] => video("3gp", "video/3gpp"),
        _ => video("mp4", "video/mp4"),
    }
}

/// Ogg carries either Theora video or audio codecs in its first page.
fn from_ogg(data: &[u8]) -> DetectedType {
    let window = &data[..data.len().min(64)];
    if contains(window, b"\x80theora") {
        video("ogv", "video/ogg")
    } else if contains(window, b"OpusHead") {
        audio("opus", "audio/opus")
    } else if contains(window, b"\x01vorbis") {
        audio("ogg", "audio/ogg")
    } else {
        DetectedType::new(MediaKind::Unknown, "ogx", "application/ogg")
    }
}

/// MPEG audio frame sync without an ID3 tag.
fn is_mp3_frame(data: &[u8]) -> bool {
    matches!(data, [0xFF, 0xFB | 0xF3 | 0xF2, ..])
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn video(ext: &str, mime: &str) -> DetectedType {
    DetectedType::new(MediaKind::Video, ext, mime)
}

fn audio(ext: &str, mime: &str) -> DetectedType {
    DetectedType::new(MediaKind::Unknown, ext, mime)
}
