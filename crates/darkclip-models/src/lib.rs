//! Shared data models for DarkClip.
//!
//! This crate provides Serde-serializable types for:
//! - Extracted clips and their per-segment grouping
//! - Footage categories used for semantic matching
//! - The script document produced by the upstream script generator

pub mod category;
pub mod clip;
pub mod script;

// Re-export common types
pub use category::{CategoryParseError, ClipCategory};
pub use clip::{ExtractedClip, ExtractionOutcome, SegmentClips};
pub use script::FactScript;
