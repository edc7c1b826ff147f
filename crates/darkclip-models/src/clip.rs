//! Extracted clip models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How a clip file was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// Sub-range remuxed with stream copy, no re-encoding.
    LosslessCut,
    /// The whole source file copied byte-for-byte.
    FullCopyFallback,
}

impl ExtractionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionOutcome::LosslessCut => "lossless_cut",
            ExtractionOutcome::FullCopyFallback => "full_copy_fallback",
        }
    }

    /// Whether the output is a true sub-clip of the source.
    pub fn is_cut(&self) -> bool {
        matches!(self, ExtractionOutcome::LosslessCut)
    }
}

impl fmt::Display for ExtractionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single clip produced for one (segment, variation) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedClip {
    /// Path of the produced clip file
    pub path: PathBuf,

    /// Local footage file the clip was taken from
    pub source: PathBuf,

    /// How the clip was produced
    pub outcome: ExtractionOutcome,

    /// Start offset in the source (seconds), only set for lossless cuts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_secs: Option<f64>,
}

impl ExtractedClip {
    /// Create a clip record for a lossless cut starting at `start_secs`.
    pub fn cut(path: impl Into<PathBuf>, source: impl Into<PathBuf>, start_secs: f64) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            outcome: ExtractionOutcome::LosslessCut,
            start_secs: Some(start_secs),
        }
    }

    /// Create a clip record for a full-file fallback copy.
    pub fn full_copy(path: impl Into<PathBuf>, source: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            outcome: ExtractionOutcome::FullCopyFallback,
            start_secs: None,
        }
    }
}

/// All clips produced for one segment (one query).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentClips {
    /// 0-based segment index
    pub segment_index: usize,

    /// The visual query for this segment
    pub query: String,

    /// One clip per requested variation, in variation order
    #[serde(default)]
    pub clips: Vec<ExtractedClip>,
}

impl SegmentClips {
    /// Create an empty segment result.
    pub fn empty(segment_index: usize, query: impl Into<String>) -> Self {
        Self {
            segment_index,
            query: query.into(),
            clips: Vec::new(),
        }
    }

    /// Paths of the produced clips, in variation order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.clips.iter().map(|c| c.path.clone()).collect()
    }

    /// Number of clips that are lossless sub-clips.
    pub fn lossless_count(&self) -> usize {
        self.clips.iter().filter(|c| c.outcome.is_cut()).count()
    }
}
