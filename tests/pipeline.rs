//! Pipeline integration tests
//!
//! Drive `create_sticker` end to end: both conversion paths, input shapes,
//! error routing, and the temp-file lifecycle.

mod common;

use assert_matches::assert_matches;
use bytes::Bytes;
use futures::stream;
use image::ImageFormat;
use stickerkit::embed::derive_pack_id;
use stickerkit::{
    create_sticker, read_sticker_metadata, ConversionOptions, Error, RawInput, StickerMetadata,
};
use tempfile::tempdir;

fn cats() -> StickerMetadata {
    StickerMetadata::new("Cats")
        .with_author("Ana")
        .with_categories(["😺"])
}

// ===== Image path =====

#[tokio::test]
async fn image_becomes_webp_with_metadata_and_no_temp_files() {
    let scratch = tempdir().unwrap();
    let options = ConversionOptions::new()
        .with_metadata(cats())
        .with_temp_dir(scratch.path());

    let sticker = create_sticker(common::png(12, 9), &options).await.unwrap();

    assert_eq!(&sticker[0..4], b"RIFF");
    assert_eq!(&sticker[8..12], b"WEBP");
    let decoded = image::load_from_memory_with_format(&sticker, ImageFormat::WebP).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (12, 9));

    let meta = read_sticker_metadata(&sticker).unwrap().unwrap();
    assert_eq!(meta.pack_name, "Cats");
    assert_eq!(meta.author.as_deref(), Some("Ana"));
    assert_eq!(meta.categories, Some(vec!["😺".to_string()]));
    assert_eq!(meta.pack_id, Some(derive_pack_id("Cats", Some("Ana"))));

    assert_eq!(common::entries(scratch.path()), 0);
}

#[tokio::test]
async fn image_without_metadata_has_none_embedded() {
    let sticker = create_sticker(common::png(4, 4), &ConversionOptions::new())
        .await
        .unwrap();
    assert_eq!(read_sticker_metadata(&sticker).unwrap(), None);
}

#[tokio::test]
async fn webp_input_is_reencoded() {
    let sticker = create_sticker(common::webp(), &ConversionOptions::new().with_metadata(cats()))
        .await
        .unwrap();
    assert!(read_sticker_metadata(&sticker).unwrap().is_some());
}

// ===== Input shapes =====

#[tokio::test]
async fn stream_and_buffer_inputs_give_identical_stickers() {
    let png = common::png(10, 10);
    let options = ConversionOptions::new().with_metadata(cats());

    let from_buffer = create_sticker(png.clone(), &options).await.unwrap();

    let chunks: Vec<std::io::Result<Bytes>> = png
        .chunks(7)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    let from_stream = create_sticker(RawInput::chunks(stream::iter(chunks)), &options)
        .await
        .unwrap();

    let from_reader = create_sticker(RawInput::reader(std::io::Cursor::new(png)), &options)
        .await
        .unwrap();

    assert_eq!(from_buffer, from_stream);
    assert_eq!(from_buffer, from_reader);
}

#[tokio::test]
async fn empty_input_is_invalid_argument() {
    let scratch = tempdir().unwrap();
    let options = ConversionOptions::new()
        .with_transcoder("/nonexistent/ffmpeg")
        .with_temp_dir(scratch.path());

    let err = create_sticker(Vec::new(), &options).await.unwrap_err();
    assert_matches!(err, Error::InvalidArgument { .. });

    let empty = stream::iter(Vec::<std::io::Result<Bytes>>::new());
    let err = create_sticker(RawInput::chunks(empty), &options)
        .await
        .unwrap_err();
    assert_matches!(err, Error::InvalidArgument { .. });

    assert_eq!(common::entries(scratch.path()), 0);
}

// ===== Routing =====

#[tokio::test]
async fn plain_text_is_unsupported() {
    let err = create_sticker(b"hello, world\n", &ConversionOptions::new())
        .await
        .unwrap_err();
    assert_matches!(err, Error::UnsupportedInput(_));
    assert_eq!(err.exit_status(), 65);
}

#[tokio::test]
async fn audio_is_unsupported() {
    let mut mp3 = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
    mp3.extend_from_slice(&[0; 32]);
    let err = create_sticker(mp3, &ConversionOptions::new().with_transcoder("/bin/true"))
        .await
        .unwrap_err();
    assert_matches!(err, Error::UnsupportedInput(_));
}

#[tokio::test]
async fn avif_is_unsupported_and_never_reaches_transcoder() {
    let avif = common::avif(16, 16);
    let detected = sk_probe::detect(&avif);
    assert_eq!(detected.extension, "avif");

    let scratch = tempdir().unwrap();
    let options = ConversionOptions::new()
        .with_transcoder("/nonexistent/ffmpeg")
        .with_temp_dir(scratch.path());
    let err = create_sticker(avif, &options).await.unwrap_err();

    assert_matches!(err, Error::UnsupportedInput(_));
    assert_eq!(common::entries(scratch.path()), 0);
}

#[tokio::test]
async fn video_without_transcoder_is_configuration_error() {
    let scratch = tempdir().unwrap();
    let options = ConversionOptions::new().with_temp_dir(scratch.path());

    let err = create_sticker(common::mp4_header(), &options)
        .await
        .unwrap_err();

    assert_matches!(err, Error::Configuration(ref msg) if msg == "transcoder path not specified");
    assert_eq!(common::entries(scratch.path()), 0);
}

// ===== Video path =====

#[cfg(unix)]
mod video {
    use super::*;

    #[tokio::test]
    async fn two_temp_files_during_transcode_none_after() {
        let bin = tempdir().unwrap();
        let scratch = tempdir().unwrap();
        let listing = bin.path().join("listing.txt");
        let transcoder = common::copying_transcoder(bin.path(), &listing);

        let options = ConversionOptions::new()
            .with_transcoder(transcoder)
            .with_temp_dir(scratch.path())
            .with_metadata(cats());
        let sticker = create_sticker(common::mp4_header(), &options).await.unwrap();

        let seen = std::fs::read_to_string(&listing).unwrap();
        let names: Vec<&str> = seen.lines().collect();
        assert_eq!(names.len(), 2, "listing: {seen}");
        assert!(names.iter().any(|n| n.ends_with(".mp4")));
        assert!(names.iter().any(|n| n.ends_with(".webp")));
        assert_eq!(common::entries(scratch.path()), 0);

        let meta = read_sticker_metadata(&sticker).unwrap().unwrap();
        assert_eq!(meta.pack_name, "Cats");
    }

    #[tokio::test]
    async fn nonzero_exit_reports_code_and_cleans_up() {
        let bin = tempdir().unwrap();
        let scratch = tempdir().unwrap();
        let transcoder = common::fake_transcoder(
            bin.path(),
            "echo garbage > \"$last\"\necho 'Invalid data found' >&2\nexit 3",
        );

        let options = ConversionOptions::new()
            .with_transcoder(transcoder)
            .with_temp_dir(scratch.path());
        let err = create_sticker(common::mp4_header(), &options)
            .await
            .unwrap_err();

        assert_eq!(err.transcode_exit_code(), Some(3));
        assert_eq!(err.exit_status(), 70);
        assert!(err.to_string().contains("Invalid data found"));
        assert_eq!(common::entries(scratch.path()), 0);
    }

    #[tokio::test]
    async fn concurrent_calls_do_not_collide() {
        let bin = tempdir().unwrap();
        let scratch = tempdir().unwrap();
        let listing = bin.path().join("listing.txt");
        let transcoder = common::copying_transcoder(bin.path(), &listing);
        let options = ConversionOptions::new()
            .with_transcoder(transcoder)
            .with_temp_dir(scratch.path());

        let calls = (0..8).map(|_| create_sticker(common::mp4_header(), &options));
        let results = futures::future::join_all(calls).await;

        for result in results {
            let sticker = result.unwrap();
            assert_eq!(&sticker[8..12], b"WEBP");
        }
        assert_eq!(common::entries(scratch.path()), 0);
    }
}
