//! Batch extraction: clips for every (query, variation) pair.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, info_span, warn, Instrument};

use darkclip_models::SegmentClips;

use crate::candidates::list_candidates;
use crate::clip::{extract_clip, CutPolicy, DEFAULT_CLIP_DURATION_SECS};
use crate::cutter::{ClipCutter, FfmpegClipCutter, DEFAULT_CUT_TIMEOUT};
use crate::matcher::select_best_file;
use crate::probe::{DurationProber, FfprobeDurationProber, DEFAULT_PROBE_TIMEOUT};
use crate::tools::ToolPaths;

/// Extractor settings.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Directory holding long-form `.mp4` footage
    pub footage_dir: PathBuf,
    /// Directory the clips are written to
    pub output_dir: PathBuf,
    /// Length of each clip (seconds)
    pub clip_duration: f64,
    /// Cut window and short-source rules
    pub policy: CutPolicy,
    /// Bound on each duration probe
    pub probe_timeout: Duration,
    /// Bound on each cut
    pub cut_timeout: Duration,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            footage_dir: PathBuf::from("local_footage"),
            output_dir: PathBuf::from("assets"),
            clip_duration: DEFAULT_CLIP_DURATION_SECS,
            policy: CutPolicy::default(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            cut_timeout: DEFAULT_CUT_TIMEOUT,
        }
    }
}

impl ExtractorConfig {
    /// Default settings with the given directories.
    pub fn new(footage_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            footage_dir: footage_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Output path for a segment (0-based) and variation (1-based).
    pub fn clip_path(&self, segment_index: usize, variation: usize) -> PathBuf {
        self.output_dir
            .join(format!("segment_{}_v{}.mp4", segment_index, variation))
    }
}

/// Selects local footage for queries and extracts random sub-clips.
///
/// Work is strictly sequential: one probe or cut at a time.
pub struct LocalClipExtractor<P, C, R> {
    config: ExtractorConfig,
    tools: ToolPaths,
    prober: P,
    cutter: C,
    rng: R,
}

impl LocalClipExtractor<FfprobeDurationProber, FfmpegClipCutter, StdRng> {
    /// Extractor using discovered ffprobe/ffmpeg and an OS-seeded RNG.
    pub fn from_config(config: ExtractorConfig) -> Self {
        Self::with_tools(config, ToolPaths::discover())
    }

    /// Extractor using the given tool paths and an OS-seeded RNG.
    pub fn with_tools(config: ExtractorConfig, tools: ToolPaths) -> Self {
        let prober =
            FfprobeDurationProber::new(tools.ffprobe_or_default()).with_timeout(config.probe_timeout);
        let cutter =
            FfmpegClipCutter::new(tools.ffmpeg_or_default()).with_timeout(config.cut_timeout);
        Self::new(config, tools, prober, cutter, StdRng::from_os_rng())
    }
}

impl<P, C, R> LocalClipExtractor<P, C, R>
where
    P: DurationProber,
    C: ClipCutter,
    R: Rng,
{
    /// Create an extractor from its parts.
    pub fn new(config: ExtractorConfig, tools: ToolPaths, prober: P, cutter: C, rng: R) -> Self {
        Self {
            config,
            tools,
            prober,
            cutter,
            rng,
        }
    }

    /// Clip paths per query: `queries.len()` lists of `variations` paths.
    ///
    /// Returns `queries.len()` empty lists if there is no footage or a tool
    /// is missing.
    pub async fn extract_for_queries<S: AsRef<str>>(
        &mut self,
        queries: &[S],
        variations: usize,
    ) -> Vec<Vec<PathBuf>> {
        self.extract_segments(queries, variations)
            .await
            .iter()
            .map(SegmentClips::paths)
            .collect()
    }

    /// Like [`LocalClipExtractor::extract_for_queries`] with per-clip outcomes.
    pub async fn extract_segments<S: AsRef<str>>(
        &mut self,
        queries: &[S],
        variations: usize,
    ) -> Vec<SegmentClips> {
        let mut segments: Vec<SegmentClips> = queries
            .iter()
            .enumerate()
            .map(|(i, q)| SegmentClips::empty(i, q.as_ref()))
            .collect();

        let candidates = list_candidates(&self.config.footage_dir).await;
        if candidates.is_empty() {
            warn!(
                "No local footage in {}, returning empty results",
                self.config.footage_dir.display()
            );
            return segments;
        }

        if let Err(e) = self.tools.ensure_present() {
            error!("{}, skipping local clip extraction", e);
            return segments;
        }

        if let Err(e) = tokio::fs::create_dir_all(&self.config.output_dir).await {
            // Each fallback copy will retry creating it
            warn!(
                "Could not create output directory {}: {}",
                self.config.output_dir.display(),
                e
            );
        }

        info!(
            queries = queries.len(),
            variations,
            candidates = candidates.len(),
            "Extracting local clips"
        );

        for segment in segments.iter_mut() {
            for variation in 1..=variations {
                let span = info_span!(
                    "clip",
                    segment = segment.segment_index,
                    variation
                );
                let clip = self
                    .extract_one(&segment.query, &candidates, segment.segment_index, variation)
                    .instrument(span)
                    .await;
                segment.clips.push(clip);
            }
        }

        let produced: usize = segments.iter().map(|s| s.clips.len()).sum();
        let lossless: usize = segments.iter().map(SegmentClips::lossless_count).sum();
        info!(produced, lossless, "Local clip extraction finished");

        segments
    }

    async fn extract_one(
        &mut self,
        query: &str,
        candidates: &[PathBuf],
        segment_index: usize,
        variation: usize,
    ) -> darkclip_models::ExtractedClip {
        let destination = self.config.clip_path(segment_index, variation);

        // candidates is non-empty, so selection cannot fail
        let source: &Path = match select_best_file(query, candidates, &mut self.rng) {
            Ok(path) => path,
            Err(e) => {
                error!("Selection failed: {}", e);
                &candidates[0]
            }
        };

        extract_clip(
            &self.prober,
            &self.cutter,
            &mut self.rng,
            source,
            &destination,
            self.config.clip_duration,
            &self.config.policy,
        )
        .await
    }
}
