//! Shared fixtures for integration tests.
//!
//! Media fixtures are generated in memory so the suite needs no binary files.
//! The fake transcoder is a shell script, so video-path tests are unix only.

#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use stickerkit::{RasterEncoder, WebpEncoder};

/// A `width` x `height` PNG with a half-transparent gradient.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 20) as u8, (y * 20) as u8, 200, 128])
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode png fixture");
    buf.into_inner()
}

/// A real AVIF still image, as produced by common encoders.
pub fn avif(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([40, 90, 160, 255]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Avif)
        .expect("encode avif fixture");
    buf.into_inner()
}

/// A plain WebP (no metadata) standing in for transcoder output.
pub fn webp() -> Vec<u8> {
    WebpEncoder.encode(&png(8, 8)).expect("encode webp fixture")
}

/// The leading boxes of an MP4 file: enough for signature detection.
pub fn mp4_header() -> Vec<u8> {
    let mut data = vec![0, 0, 0, 0x18];
    data.extend_from_slice(b"ftypisom");
    data.extend_from_slice(&[0, 0, 2, 0]);
    data.extend_from_slice(b"isomiso2");
    data.extend_from_slice(&[0, 0, 0, 8]);
    data.extend_from_slice(b"mdat");
    data
}

/// Number of entries in `dir`.
pub fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).expect("read scratch dir").count()
}

/// Write an executable shell script standing in for ffmpeg.
///
/// Inside `body`, `$2` is the input path and `$last` the output path.
#[cfg(unix)]
pub fn fake_transcoder(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-ffmpeg");
    fs::write(&path, format!("#!/bin/sh\nfor last; do :; done\n{body}\n"))
        .expect("write fake transcoder");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("chmod fake transcoder");
    path
}

/// A fake transcoder that copies a WebP fixture to the output path, then
/// records the scratch directory listing in `listing`.
#[cfg(unix)]
pub fn copying_transcoder(dir: &Path, listing: &Path) -> PathBuf {
    let fixture = dir.join("fixture.webp");
    fs::write(&fixture, webp()).expect("write webp fixture");
    fake_transcoder(
        dir,
        &format!(
            "cp '{}' \"$last\"\nls \"$(dirname \"$2\")\" > '{}'",
            fixture.display(),
            listing.display()
        ),
    )
}
