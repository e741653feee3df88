//! Transcode a short video into a square, looping animated WebP sticker.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::ToolCommand;
use crate::workspace::TempFilePair;

/// Side of the square canvas the video is scaled and padded into.
pub const CANVAS_SIZE: u32 = 300;

/// Side of the encoded output frame.
pub const OUTPUT_SIZE: u32 = 512;

/// Output frame rate.
pub const FRAME_RATE: u32 = 10;

/// Longest sticker produced, as an ffmpeg duration.
pub const MAX_DURATION: &str = "00:00:06";

/// libwebp quality scale.
pub const QUALITY: u32 = 50;

/// Extension of the transcoder's output file.
pub const OUTPUT_EXTENSION: &str = "webp";

/// The `-vf` filter chain: fit the longer side into the canvas keeping the
/// aspect ratio, pad with transparent pixels to an exact square, reset the
/// sample aspect ratio, and resample to a fixed frame rate.
pub fn sticker_filter() -> String {
    let s = CANVAS_SIZE;
    format!(
        "scale='iw*min({s}/iw,{s}/ih)':'ih*min({s}/iw,{s}/ih)',\
         format=rgba,\
         pad={s}:{s}:'({s}-iw)/2':'({s}-ih)/2':'#00000000',\
         setsar=1,\
         fps={FRAME_RATE}"
    )
}

/// Full argument vector for turning `input` into a sticker at `output`.
pub fn sticker_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-i".into(),
        input.to_string_lossy().into_owned(),
        "-vcodec".into(),
        "libwebp".into(),
        "-vf".into(),
        sticker_filter(),
        "-loop".into(),
        "0".into(),
        "-ss".into(),
        "00:00:00.0".into(),
        "-t".into(),
        MAX_DURATION.into(),
        "-an".into(),
        "-vsync".into(),
        "0".into(),
        "-s".into(),
        format!("{OUTPUT_SIZE}:{OUTPUT_SIZE}"),
        "-qscale:v".into(),
        QUALITY.to_string(),
        output.to_string_lossy().into_owned(),
    ]
}

/// Runs the video-to-sticker transcode through an external ffmpeg-compatible
/// binary.
#[derive(Debug, Clone)]
pub struct StickerTranscoder {
    program: PathBuf,
    temp_dir: PathBuf,
    timeout: Option<Duration>,
}

impl StickerTranscoder {
    /// Use `program` as the transcoder, with temp files in the platform temp
    /// directory and no timeout.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            temp_dir: std::env::temp_dir(),
            timeout: None,
        }
    }

    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Transcode `data` (whose detected extension is `input_ext`) and return
    /// the sticker bytes.
    ///
    /// Both temp files are removed before this returns, whatever the outcome.
    /// Removal failures are logged and never replace the result.
    #[tracing::instrument(level = "debug", skip_all, fields(ext = input_ext, bytes = data.len()))]
    pub async fn transcode(&self, data: &[u8], input_ext: &str) -> sk_core::Result<Vec<u8>> {
        let mut files = TempFilePair::new(&self.temp_dir, input_ext, OUTPUT_EXTENSION);
        tracing::debug!(
            input = %files.input().display(),
            output = %files.output().display(),
            "reserved temp files"
        );

        files.write_input(data).await?;

        let mut cmd = ToolCommand::new(self.program.clone());
        cmd.args(sticker_args(files.input(), files.output()))
            .timeout(self.timeout);

        tracing::info!("transcoding {} bytes of .{input_ext} with {}", data.len(), cmd.program_name());
        cmd.execute().await?;

        let sticker = tokio::fs::read(files.output()).await?;
        tracing::debug!("transcoder produced {} bytes", sticker.len());

        drop(files);
        Ok(sticker)
    }
}
