//! Integration tests for signature detection across the public API.

use sk_core::MediaKind;
use sk_probe::{detect, is_supported};

#[test]
fn detection_ignores_trailing_garbage() {
    let mut gif = b"GIF89a\x10\x00\x10\x00".to_vec();
    gif.extend(std::iter::repeat(0xAB).take(512));
    let t = detect(&gif);
    assert_eq!(t.kind, MediaKind::Image);
    assert_eq!(t.mime, "image/gif");
}

#[test]
fn every_video_signature_is_supported() {
    let samples: Vec<Vec<u8>> = vec![
        vec![0x1A, 0x45, 0xDF, 0xA3, 0x93, 0x42, 0x82, 0x88],
        b"\x00\x00\x00\x18ftypmp42\x00\x00\x00\x00mp42isom".to_vec(),
        b"RIFF\x00\x10\x00\x00AVI LIST".to_vec(),
        b"FLV\x01\x05".to_vec(),
    ];
    for sample in samples {
        let t = detect(&sample);
        assert_eq!(t.kind, MediaKind::Video, "sample {:?}", &sample[..8]);
        assert!(is_supported(&sample));
    }
}

#[test]
fn audio_is_not_supported() {
    assert!(!is_supported(b"ID3\x03\x00\x00\x00"));
    assert!(!is_supported(b"RIFF\x24\x00\x00\x00WAVEfmt "));
}

#[test]
fn unicode_text_is_not_supported() {
    let text = "ステッカー sticker 🐱".as_bytes();
    assert_eq!(detect(text).kind, MediaKind::Unknown);
}
