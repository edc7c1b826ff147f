#![deny(unreachable_patterns)]
//! Local footage clip selection and extraction.
//!
//! This crate provides:
//! - Keyword matching of visual queries against local footage file names
//! - Duration probing and lossless stream-copy cutting via the FFmpeg CLI
//! - Random sub-clip extraction with a full-copy fallback
//! - Batch extraction of clip variations for every script segment
//! - Category-aware semantic scoring of script text against footage

pub mod batch;
pub mod candidates;
pub mod clip;
pub mod command;
pub mod cutter;
pub mod error;
pub mod fs_utils;
pub mod matcher;
pub mod probe;
pub mod semantic;
pub mod tools;

#[cfg(test)]
mod test_utils;

pub use batch::{ExtractorConfig, LocalClipExtractor};
pub use candidates::list_candidates;
pub use clip::{extract_clip, CutPolicy};
pub use command::{FfmpegCommand, ToolRunner};
pub use cutter::{ClipCutter, FfmpegClipCutter};
pub use error::{MediaError, MediaResult};
pub use matcher::{select_best_file, KeywordScore};
pub use probe::{DurationProber, FfprobeDurationProber};
pub use semantic::{detect_category, extract_keywords, rank_by_semantic_score, semantic_score};
pub use tools::ToolPaths;
