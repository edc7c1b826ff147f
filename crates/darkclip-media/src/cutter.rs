//! Lossless sub-clip cutting.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::command::{FfmpegCommand, ToolRunner};
use crate::error::MediaResult;

/// Default bound on a single cut.
pub const DEFAULT_CUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cuts a fixed-length range out of a media file.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipCutter: Send + Sync {
    /// Write `duration_secs` of `source` starting at `start_secs` to `destination`.
    async fn cut(
        &self,
        source: &Path,
        destination: &Path,
        start_secs: f64,
        duration_secs: f64,
    ) -> MediaResult<()>;
}

/// [`ClipCutter`] that remuxes with `ffmpeg -c copy`.
#[derive(Debug, Clone)]
pub struct FfmpegClipCutter {
    ffmpeg: PathBuf,
    runner: ToolRunner,
}

impl FfmpegClipCutter {
    /// Create a cutter that invokes the given `ffmpeg` binary.
    pub fn new(ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            runner: ToolRunner::new().with_timeout(DEFAULT_CUT_TIMEOUT),
        }
    }

    /// Set the cut timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.runner = ToolRunner::new().with_timeout(timeout);
        self
    }
}

/// Build the stream-copy cut command.
pub fn build_cut_command(
    source: &Path,
    destination: &Path,
    start_secs: f64,
    duration_secs: f64,
) -> FfmpegCommand {
    FfmpegCommand::new(source, destination)
        .seek(start_secs)
        .duration(duration_secs)
        .stream_copy()
        .avoid_negative_ts()
}

#[async_trait]
impl ClipCutter for FfmpegClipCutter {
    async fn cut(
        &self,
        source: &Path,
        destination: &Path,
        start_secs: f64,
        duration_secs: f64,
    ) -> MediaResult<()> {
        info!(
            "Cutting {} -> {} (start: {:.2}s, duration: {:.2}s)",
            source.display(),
            destination.display(),
            start_secs,
            duration_secs
        );

        let cmd = build_cut_command(source, destination, start_secs, duration_secs);
        self.runner.run_ffmpeg(&self.ffmpeg, &cmd).await
    }
}
