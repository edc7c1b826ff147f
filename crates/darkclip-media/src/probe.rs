//! FFprobe duration probing.

use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::command::ToolRunner;
use crate::error::{MediaError, MediaResult};

/// Default bound on a single probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Reports the duration of a media file.
///
/// Implementations never fail: `0.0` means the duration is unknown, which
/// callers treat the same as a too-short source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DurationProber: Send + Sync {
    /// Duration of `path` in seconds, or `0.0` if it cannot be determined.
    async fn probe_duration(&self, path: &Path) -> f64;
}

/// [`DurationProber`] backed by the `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct FfprobeDurationProber {
    ffprobe: PathBuf,
    runner: ToolRunner,
}

impl FfprobeDurationProber {
    /// Create a prober that invokes the given `ffprobe` binary.
    pub fn new(ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe: ffprobe.into(),
            runner: ToolRunner::new().with_timeout(DEFAULT_PROBE_TIMEOUT),
        }
    }

    /// Set the probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.runner = ToolRunner::new().with_timeout(timeout);
        self
    }

    /// Probe the duration, surfacing failures.
    pub async fn try_probe(&self, path: &Path) -> MediaResult<f64> {
        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }

        let args = [
            OsStr::new("-v"),
            OsStr::new("error"),
            OsStr::new("-show_entries"),
            OsStr::new("format=duration"),
            OsStr::new("-of"),
            OsStr::new("default=noprint_wrappers=1:nokey=1"),
            path.as_os_str(),
        ];
        let output = self.runner.output(&self.ffprobe, args).await?;

        if !output.status.success() {
            return Err(MediaError::ffprobe_failed(
                "FFprobe exited with non-zero status",
                Some(String::from_utf8_lossy(&output.stderr).trim().to_string()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_duration(&stdout).ok_or_else(|| {
            MediaError::ffprobe_failed(format!("Unparsable duration: {:?}", stdout.trim()), None)
        })
    }
}

#[async_trait]
impl DurationProber for FfprobeDurationProber {
    async fn probe_duration(&self, path: &Path) -> f64 {
        match self.try_probe(path).await {
            Ok(duration) => {
                debug!("Probed {}: {:.2}s", path.display(), duration);
                duration
            }
            Err(e) => {
                warn!("Duration probe failed for {}: {}", path.display(), e);
                0.0
            }
        }
    }
}

/// Parse ffprobe's bare duration output (e.g. `"123.456000\n"`).
fn parse_duration(s: &str) -> Option<f64> {
    let duration: f64 = s.lines().next()?.trim().parse().ok()?;
    (duration.is_finite() && duration >= 0.0).then_some(duration)
}
