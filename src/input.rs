//! Input normalization: every accepted input shape becomes one byte buffer.

use std::fmt;
use std::io;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures::stream::{BoxStream, Stream, StreamExt};
use sk_core::{Error, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Media handed to the pipeline: an in-memory buffer or a byte source that is
/// drained exactly once.
pub enum RawInput {
    /// Bytes already in memory.
    Bytes(Bytes),
    /// An async reader, read to EOF.
    Reader(Pin<Box<dyn AsyncRead + Send>>),
    /// A stream of chunks, concatenated in arrival order.
    Chunks(BoxStream<'static, io::Result<Bytes>>),
}

impl RawInput {
    /// Wrap any async reader (file, stdin, socket, ...).
    pub fn reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        RawInput::Reader(Box::pin(reader))
    }

    /// Wrap a stream of byte chunks.
    pub fn chunks<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        RawInput::Chunks(stream.boxed())
    }
}

impl fmt::Debug for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawInput::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            RawInput::Reader(_) => f.write_str("Reader(..)"),
            RawInput::Chunks(_) => f.write_str("Chunks(..)"),
        }
    }
}

impl From<Bytes> for RawInput {
    fn from(b: Bytes) -> Self {
        RawInput::Bytes(b)
    }
}

impl From<Vec<u8>> for RawInput {
    fn from(v: Vec<u8>) -> Self {
        RawInput::Bytes(Bytes::from(v))
    }
}

impl From<&[u8]> for RawInput {
    fn from(s: &[u8]) -> Self {
        RawInput::Bytes(Bytes::copy_from_slice(s))
    }
}

impl<const N: usize> From<&[u8; N]> for RawInput {
    fn from(s: &[u8; N]) -> Self {
        RawInput::Bytes(Bytes::copy_from_slice(s))
    }
}

/// Drain `input` into a single non-empty buffer.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when the input is empty (including a stream
/// that ends without yielding any bytes) or when the source reports an I/O
/// error while being drained.
pub async fn normalize(input: RawInput) -> Result<Bytes> {
    let data = match input {
        RawInput::Bytes(b) => b,
        RawInput::Reader(mut reader) => {
            let mut buf = Vec::new();
            reader
                .read_to_end(&mut buf)
                .await
                .map_err(Error::unreadable_input)?;
            Bytes::from(buf)
        }
        RawInput::Chunks(mut stream) => {
            let mut buf = BytesMut::new();
            while let Some(chunk) = stream.next().await {
                buf.extend_from_slice(&chunk.map_err(Error::unreadable_input)?);
            }
            buf.freeze()
        }
    };

    if data.is_empty() {
        return Err(Error::invalid_argument("no input provided"));
    }

    tracing::debug!("normalized input to {} bytes", data.len());
    Ok(data)
}
