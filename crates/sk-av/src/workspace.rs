//! Temporary file lifecycle for transcoder invocations.
//!
//! A [`TempFilePair`] names one input-side and one output-side file in a temp
//! directory. Once [`TempFilePair::write_input`] has created the input file,
//! both paths belong to the pair and are removed when it is dropped, so every
//! exit path of the code holding it (success, `?` propagation, panic,
//! cancelled future) cleans up. A pair that never created its input removes
//! nothing.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Process-wide sequence number mixed into every stem.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Input/output temp paths sharing one unique stem.
///
/// # Example
///
/// ```no_run
/// # async fn demo() -> std::io::Result<()> {
/// use sk_av::TempFilePair;
///
/// let mut pair = TempFilePair::new(&std::env::temp_dir(), "mp4", "webp");
/// pair.write_input(b"...").await?;
/// // ... run the transcoder, read pair.output() ...
/// drop(pair); // both files are gone
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TempFilePair {
    input: PathBuf,
    output: PathBuf,
    /// Set once this pair has created the input file.
    claimed: bool,
}

impl TempFilePair {
    /// Reserve two paths in `dir`: `<stem>.<input_ext>` and
    /// `<stem>.<output_ext>`.
    pub fn new(dir: &Path, input_ext: &str, output_ext: &str) -> Self {
        let stem = unique_stem();
        Self {
            input: dir.join(format!("{stem}.{input_ext}")),
            output: dir.join(format!("{stem}.{output_ext}")),
            claimed: false,
        }
    }

    /// Create the input file and write `data` to it.
    ///
    /// Fails with [`std::io::ErrorKind::AlreadyExists`] if something is
    /// already at the input path; the pair then leaves both paths alone.
    pub async fn write_input(&mut self, data: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.input)
            .await?;
        self.claimed = true;
        file.write_all(data).await?;
        file.flush().await
    }

    /// Path the source media is written to.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Path the transcoder writes its result to.
    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl Drop for TempFilePair {
    fn drop(&mut self) {
        if !self.claimed {
            return;
        }
        for path in [&self.input, &self.output] {
            match std::fs::remove_file(path) {
                Ok(()) => tracing::trace!("removed temp file {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!("failed to remove temp file {}: {e}", path.display())
                }
            }
        }
    }
}

/// `<millis>-<pid>-<seq>-<8 random hex digits>`.
fn unique_stem() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let random = Uuid::new_v4().simple().to_string();
    format!("{millis}-{}-{seq}-{}", std::process::id(), &random[..8])
}
