//! Builder for executing external tool commands with optional timeout.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use sk_core::{Error, TranscodeFailure};
use tokio::process::Command;

/// How many trailing stderr lines to keep in an exit failure.
const STDERR_TAIL_LINES: usize = 12;

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use sk_av::ToolCommand;
/// use std::path::PathBuf;
///
/// # async fn example() -> sk_core::Result<()> {
/// let output = ToolCommand::new(PathBuf::from("ffmpeg"))
///     .arg("-hide_banner")
///     .arg("-version")
///     .execute()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time. Without one the call waits for the
    /// process indefinitely.
    pub fn timeout(&mut self, d: Option<Duration>) -> &mut Self {
        self.timeout = d;
        self
    }

    /// Short program name used in errors and logs.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// The child is killed if the returned future is dropped before it
    /// completes, including when the timeout fires.
    ///
    /// # Errors
    ///
    /// - [`TranscodeFailure::Spawn`] if the process cannot be started.
    /// - [`TranscodeFailure::Exit`] if it exits with a non-zero status (the
    ///   tail of stderr is included).
    /// - [`TranscodeFailure::Timeout`] if the timeout expires.
    /// - [`Error::Io`] if waiting on the process fails.
    pub async fn execute(&self) -> sk_core::Result<ToolOutput> {
        let program_name = self.program_name();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!("spawning {} {}", self.program.display(), self.args.join(" "));

        let child = cmd
            .spawn()
            .map_err(|e| Error::transcode(&program_name, TranscodeFailure::Spawn(e)))?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_elapsed| {
                    Error::transcode(&program_name, TranscodeFailure::Timeout(limit))
                })??,
            None => child.wait_with_output().await?,
        };

        let tool_output = ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            return Err(Error::transcode(
                program_name,
                TranscodeFailure::Exit {
                    code: output.status.code(),
                    stderr: stderr_tail(&tool_output.stderr),
                },
            ));
        }

        Ok(tool_output)
    }
}

/// Last few non-empty lines of stderr; ffmpeg prints a long banner first.
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
