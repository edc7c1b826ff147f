//! FFmpeg command builder and tool runner.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Builder for FFmpeg commands.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file path
    input: PathBuf,
    /// Output file path
    output: PathBuf,
    /// Input arguments (before -i)
    input_args: Vec<String>,
    /// Output arguments (after -i)
    output_args: Vec<String>,
    /// Whether to overwrite output
    overwrite: bool,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            overwrite: true,
        }
    }

    /// Add input arguments (before -i).
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add output arguments (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Set seek position (before input, so FFmpeg seeks without decoding).
    pub fn seek(self, seconds: f64) -> Self {
        self.input_arg("-ss").input_arg(format!("{:.3}", seconds))
    }

    /// Set output duration.
    pub fn duration(self, seconds: f64) -> Self {
        self.output_arg("-t").output_arg(format!("{:.3}", seconds))
    }

    /// Remux all streams without re-encoding.
    pub fn stream_copy(self) -> Self {
        self.output_arg("-c").output_arg("copy")
    }

    /// Shift timestamps so the output starts at zero after a non-keyframe seek.
    pub fn avoid_negative_ts(self) -> Self {
        self.output_arg("-avoid_negative_ts").output_arg("make_zero")
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-v".to_string());
        args.push("error".to_string());

        args.extend(self.input_args.clone());

        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        args.extend(self.output_args.clone());

        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Runs an external tool with captured output and an optional timeout.
#[derive(Debug, Clone, Default)]
pub struct ToolRunner {
    /// Timeout
    timeout: Option<Duration>,
}

impl ToolRunner {
    /// Create a new runner.
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Set timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run `program` with `args`, returning its captured output.
    ///
    /// A non-zero exit status is not an error here; callers decide.
    /// On timeout the child is killed and [`MediaError::Timeout`] returned.
    pub async fn output<I, S>(&self, program: &Path, args: I) -> MediaResult<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let wait = child.wait_with_output();

        match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, wait).await {
                Ok(result) => Ok(result?),
                Err(_) => {
                    // Dropping the wait future drops the child, which kills it
                    warn!(
                        "{} timed out after {:?}, killing process",
                        program.display(),
                        timeout
                    );
                    Err(MediaError::Timeout(timeout))
                }
            },
            None => Ok(wait.await?),
        }
    }

    /// Run an FFmpeg command with the given binary.
    pub async fn run_ffmpeg(&self, ffmpeg: &Path, cmd: &FfmpegCommand) -> MediaResult<()> {
        let args = cmd.build_args();
        debug!("Running FFmpeg: {} {}", ffmpeg.display(), args.join(" "));

        let output = self.output(ffmpeg, &args).await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                Some(String::from_utf8_lossy(&output.stderr).trim().to_string()),
                output.status.code(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fake_tool;
    use std::time::Instant;

    #[test]
    fn test_cut_command_layout() {
        let cmd = FfmpegCommand::new("long.mp4", "segment_0_v1.mp4")
            .seek(12.5)
            .duration(4.0)
            .stream_copy()
            .avoid_negative_ts();

        let args = cmd.build_args();
        let pos = |needle: &str| args.iter().position(|a| a == needle).unwrap();

        assert_eq!(args[0], "-y");
        assert_eq!(args[pos("-ss") + 1], "12.500");
        assert!(pos("-ss") < pos("-i"), "seek must come before the input");
        assert!(pos("-t") > pos("-i"));
        assert_eq!(args[pos("-t") + 1], "4.000");
        assert_eq!(args[pos("-c") + 1], "copy");
        assert_eq!(args[pos("-avoid_negative_ts") + 1], "make_zero");
        assert_eq!(args.last().unwrap(), "segment_0_v1.mp4");
    }

    #[test]
    fn test_errors_only_logging() {
        let args = FfmpegCommand::new("in.mp4", "out.mp4").build_args();
        assert_eq!(&args[1..3], &["-v".to_string(), "error".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_program_is_io_error() {
        let result = ToolRunner::new()
            .with_timeout(Duration::from_secs(1))
            .output(Path::new("/nonexistent/darkclip-tool"), ["-version"])
            .await;
        assert!(matches!(result, Err(MediaError::Io(_))));
    }

    #[tokio::test]
    async fn test_hung_tool_is_killed_on_timeout() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = fake_tool(dir.path(), "hang", "sleep 30");

        let started = Instant::now();
        let result = ToolRunner::new()
            .with_timeout(Duration::from_secs(1))
            .output(&tool, ["-version"])
            .await;

        assert!(matches!(result, Err(MediaError::Timeout(t)) if t == Duration::from_secs(1)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_returned_not_raised() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = fake_tool(dir.path(), "fails", "echo partial; echo broken >&2; exit 3");

        let output = ToolRunner::new().output(&tool, ["x"]).await.unwrap();
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "partial");

        let cmd = FfmpegCommand::new("in.mp4", "out.mp4");
        match ToolRunner::new().run_ffmpeg(&tool, &cmd).await {
            Err(MediaError::FfmpegFailed {
                stderr, exit_code, ..
            }) => {
                assert_eq!(exit_code, Some(3));
                assert_eq!(stderr.as_deref(), Some("broken"));
            }
            other => panic!("expected FfmpegFailed, got {:?}", other),
        }
    }
}
