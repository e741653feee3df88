//! Unified error type for stickerkit.
//!
//! Every stage of the conversion pipeline funnels its failures into [`Error`],
//! which carries enough context for the CLI to derive a process exit code via
//! [`Error::exit_status`].

use std::time::Duration;

/// Unified error type covering all failure modes of a sticker conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was missing, empty, or its stream could not be read.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable description.
        message: String,
        /// The stream error that caused the rejection, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The content signature is neither an image nor a video.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Required configuration is missing (e.g. no transcoder path for video).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The raster encoder rejected the input.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The external transcoder failed to spawn, exited non-zero, or timed out.
    #[error("Transcode error [{tool}]: {failure}")]
    Transcode {
        /// Name of the transcoder binary.
        tool: String,
        /// What went wrong.
        #[source]
        failure: TranscodeFailure,
    },

    /// A filesystem operation on the transcode path failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Sticker metadata could not be embedded or read.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why an external transcoder invocation failed.
#[derive(Debug, thiserror::Error)]
pub enum TranscodeFailure {
    /// The process ran but did not exit with status zero.
    ///
    /// `code` is `None` when the process was terminated by a signal.
    #[error("exited with code {}: {stderr}", display_code(.code))]
    Exit {
        code: Option<i32>,
        stderr: String,
    },

    /// The process could not be started (binary missing, not executable, ...).
    #[error("failed to spawn: {0}")]
    Spawn(#[source] std::io::Error),

    /// The process did not finish within the configured timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
}

impl Error {
    /// Map this error to a sysexits-style process exit code.
    pub fn exit_status(&self) -> i32 {
        match self {
            Error::InvalidArgument { .. } => 64,
            Error::UnsupportedInput(_) => 65,
            Error::Encoding(_) => 65,
            Error::Transcode {
                failure: TranscodeFailure::Spawn(_),
                ..
            } => 69,
            Error::Transcode { .. } => 70,
            Error::Internal(_) => 70,
            Error::Metadata(_) => 70,
            Error::Io { .. } => 74,
            Error::Configuration(_) => 78,
        }
    }

    /// Exit code reported by the transcoder, if this is an exit failure.
    pub fn transcode_exit_code(&self) -> Option<i32> {
        match self {
            Error::Transcode {
                failure: TranscodeFailure::Exit { code, .. },
                ..
            } => *code,
            _ => None,
        }
    }

    /// Convenience constructor for [`Error::InvalidArgument`] without a source.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
            source: None,
        }
    }

    /// Convenience constructor for [`Error::InvalidArgument`] wrapping a stream error.
    pub fn unreadable_input(source: std::io::Error) -> Self {
        Error::InvalidArgument {
            message: format!("failed to read input stream: {source}"),
            source: Some(source),
        }
    }

    /// Convenience constructor for [`Error::Transcode`].
    pub fn transcode(tool: impl Into<String>, failure: TranscodeFailure) -> Self {
        Error::Transcode {
            tool: tool.into(),
            failure,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
