//! Random sub-clip extraction with full-copy fallback.
//!
//! Sources no longer than the short-video threshold are copied whole. Longer
//! sources get a random start inside a window that skips the intro and leaves
//! a tail buffer, then a stream-copy cut. Any cut failure degrades to a full
//! copy, so [`extract_clip`] always produces a clip record.

use rand::Rng;
use std::path::Path;
use tracing::{error, info, warn};

use darkclip_models::ExtractedClip;

use crate::cutter::ClipCutter;
use crate::error::{MediaError, MediaResult};
use crate::fs_utils::{copy_file, file_size};
use crate::probe::DurationProber;

/// Sources at or below this duration are copied whole (seconds).
pub const SHORT_VIDEO_THRESHOLD_SECS: f64 = 10.0;
/// Earliest allowed start, skipping intro material (seconds).
pub const INTRO_SKIP_SECS: f64 = 5.0;
/// Space kept between the clip end and the end of the source (seconds).
pub const TAIL_BUFFER_SECS: f64 = 2.0;
/// Length of each extracted clip (seconds).
pub const DEFAULT_CLIP_DURATION_SECS: f64 = 4.0;

/// Where cuts may start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPolicy {
    pub short_video_threshold: f64,
    pub intro_skip: f64,
    pub tail_buffer: f64,
}

impl Default for CutPolicy {
    fn default() -> Self {
        Self {
            short_video_threshold: SHORT_VIDEO_THRESHOLD_SECS,
            intro_skip: INTRO_SKIP_SECS,
            tail_buffer: TAIL_BUFFER_SECS,
        }
    }
}

impl CutPolicy {
    /// Whether a source of `duration` seconds is copied instead of cut.
    pub fn is_short(&self, duration: f64) -> bool {
        duration <= self.short_video_threshold
    }

    /// Inclusive `(min_start, max_start)` window for a cut of `clip_duration`.
    ///
    /// Collapses to `(intro_skip, intro_skip)` when the source is too short
    /// for a proper window.
    pub fn start_window(&self, duration: f64, clip_duration: f64) -> (f64, f64) {
        let min_start = self.intro_skip;
        let max_start = duration - clip_duration - self.tail_buffer;
        if max_start < min_start {
            (min_start, min_start)
        } else {
            (min_start, max_start)
        }
    }

    /// Draw a start offset uniformly from [`CutPolicy::start_window`].
    pub fn pick_start<R>(&self, duration: f64, clip_duration: f64, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        let (min_start, max_start) = self.start_window(duration, clip_duration);
        if max_start > min_start {
            rng.random_range(min_start..=max_start)
        } else {
            min_start
        }
    }
}

/// Extract a `clip_duration` second clip of `source` into `destination`.
///
/// Never fails: cut errors are logged and replaced by a full copy. If even
/// the copy fails, the error is logged and the destination is still reported.
pub async fn extract_clip<R>(
    prober: &dyn DurationProber,
    cutter: &dyn ClipCutter,
    rng: &mut R,
    source: &Path,
    destination: &Path,
    clip_duration: f64,
    policy: &CutPolicy,
) -> ExtractedClip
where
    R: Rng + ?Sized,
{
    let duration = prober.probe_duration(source).await;

    if policy.is_short(duration) {
        info!(
            source = %source.display(),
            duration,
            "Source is short or unprobed, copying whole file"
        );
        full_copy(source, destination).await;
        return ExtractedClip::full_copy(destination, source);
    }

    let start = policy.pick_start(duration, clip_duration, rng);

    match try_cut(cutter, source, destination, start, clip_duration).await {
        Ok(()) => {
            info!(
                source = %source.display(),
                destination = %destination.display(),
                start,
                "Lossless cut complete"
            );
            ExtractedClip::cut(destination, source, start)
        }
        Err(e) => {
            warn!(
                source = %source.display(),
                "Cut failed ({}), falling back to full copy",
                e
            );
            full_copy(source, destination).await;
            ExtractedClip::full_copy(destination, source)
        }
    }
}

/// Run the cutter and verify it left a non-empty file behind.
async fn try_cut(
    cutter: &dyn ClipCutter,
    source: &Path,
    destination: &Path,
    start: f64,
    clip_duration: f64,
) -> MediaResult<()> {
    // A leftover clip from an earlier run must not pass the size check
    match tokio::fs::remove_file(destination).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    cutter.cut(source, destination, start, clip_duration).await?;

    match file_size(destination).await {
        Some(size) if size > 0 => Ok(()),
        _ => Err(MediaError::CutOutputMissing(destination.to_path_buf())),
    }
}

async fn full_copy(source: &Path, destination: &Path) {
    if let Err(e) = copy_file(source, destination).await {
        error!(
            "Full copy fallback failed {} -> {}: {}",
            source.display(),
            destination.display(),
            e
        );
    }
}
