//! External tool discovery.
//!
//! Tool locations are resolved once into a [`ToolPaths`] value that is passed
//! to the extractor, so nothing below this module looks at `PATH` directly.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Binary name of the duration probe.
pub const FFPROBE: &str = "ffprobe";
/// Binary name of the cut utility.
pub const FFMPEG: &str = "ffmpeg";

/// Install location checked when a tool is not on `PATH`.
pub const FALLBACK_TOOL_DIR: &str = "/opt/homebrew/bin";

/// Resolved locations of the external media tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPaths {
    /// Path to `ffprobe`, if found
    pub ffprobe: Option<PathBuf>,
    /// Path to `ffmpeg`, if found
    pub ffmpeg: Option<PathBuf>,
}

impl ToolPaths {
    /// Use explicit tool paths.
    pub fn new(ffprobe: impl Into<PathBuf>, ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe: Some(ffprobe.into()),
            ffmpeg: Some(ffmpeg.into()),
        }
    }

    /// Look both tools up on `PATH`, then in [`FALLBACK_TOOL_DIR`].
    pub fn discover() -> Self {
        Self::discover_in(Path::new(FALLBACK_TOOL_DIR))
    }

    /// Like [`ToolPaths::discover`] with a custom fallback directory.
    pub fn discover_in(fallback_dir: &Path) -> Self {
        Self {
            ffprobe: locate(FFPROBE, fallback_dir),
            ffmpeg: locate(FFMPEG, fallback_dir),
        }
    }

    /// Replace discovered paths with explicit overrides where given.
    pub fn with_overrides(mut self, ffprobe: Option<PathBuf>, ffmpeg: Option<PathBuf>) -> Self {
        if ffprobe.is_some() {
            self.ffprobe = ffprobe;
        }
        if ffmpeg.is_some() {
            self.ffmpeg = ffmpeg;
        }
        self
    }

    /// Fail with [`MediaError::ToolMissing`] unless both tools exist on disk.
    pub fn ensure_present(&self) -> MediaResult<()> {
        require(FFPROBE, self.ffprobe.as_deref())?;
        require(FFMPEG, self.ffmpeg.as_deref())?;
        Ok(())
    }

    /// Path to invoke for `ffprobe`, falling back to the bare name.
    pub fn ffprobe_or_default(&self) -> PathBuf {
        self.ffprobe.clone().unwrap_or_else(|| PathBuf::from(FFPROBE))
    }

    /// Path to invoke for `ffmpeg`, falling back to the bare name.
    pub fn ffmpeg_or_default(&self) -> PathBuf {
        self.ffmpeg.clone().unwrap_or_else(|| PathBuf::from(FFMPEG))
    }
}

fn locate(tool: &str, fallback_dir: &Path) -> Option<PathBuf> {
    if let Ok(path) = which::which(tool) {
        debug!("Found {} on PATH: {}", tool, path.display());
        return Some(path);
    }

    let fallback = fallback_dir.join(tool);
    if fallback.is_file() {
        debug!("Found {} at fallback location: {}", tool, fallback.display());
        return Some(fallback);
    }

    None
}

fn require(tool: &str, path: Option<&Path>) -> MediaResult<()> {
    match path {
        Some(p) if p.exists() => Ok(()),
        _ => Err(MediaError::tool_missing(tool)),
    }
}
