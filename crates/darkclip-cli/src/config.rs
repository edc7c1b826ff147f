//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use darkclip_media::{CutPolicy, ExtractorConfig, ToolPaths};

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding long-form `.mp4` footage
    pub footage_dir: PathBuf,
    /// Directory the clips are written to
    pub assets_dir: PathBuf,
    /// Clips produced per query
    pub variations_per_query: usize,
    /// Length of each clip (seconds)
    pub clip_duration: f64,
    /// Sources at or below this are copied whole (seconds)
    pub short_video_threshold: f64,
    /// Earliest cut start (seconds)
    pub intro_skip: f64,
    /// Gap left before the end of the source (seconds)
    pub tail_buffer: f64,
    /// Bound on each duration probe
    pub probe_timeout: Duration,
    /// Bound on each cut
    pub cut_timeout: Duration,
    /// Explicit `ffmpeg` location
    pub ffmpeg_path: Option<PathBuf>,
    /// Explicit `ffprobe` location
    pub ffprobe_path: Option<PathBuf>,
    /// Emit JSON logs instead of human-readable ones
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let policy = CutPolicy::default();
        let extractor = ExtractorConfig::default();
        Self {
            footage_dir: extractor.footage_dir,
            assets_dir: extractor.output_dir,
            variations_per_query: 3,
            clip_duration: extractor.clip_duration,
            short_video_threshold: policy.short_video_threshold,
            intro_skip: policy.intro_skip,
            tail_buffer: policy.tail_buffer,
            probe_timeout: extractor.probe_timeout,
            cut_timeout: extractor.cut_timeout,
            ffmpeg_path: None,
            ffprobe_path: None,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup. Unparsable values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse_f64 = |key: &str, default: f64| {
            lookup(key)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(default)
        };
        let parse_secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            footage_dir: lookup("LOCAL_FOOTAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.footage_dir),
            assets_dir: lookup("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            variations_per_query: lookup("VARIATIONS_PER_QUERY")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.variations_per_query),
            clip_duration: parse_f64("CLIP_DURATION_SECS", defaults.clip_duration),
            short_video_threshold: parse_f64(
                "SHORT_VIDEO_THRESHOLD_SECS",
                defaults.short_video_threshold,
            ),
            intro_skip: parse_f64("INTRO_SKIP_SECS", defaults.intro_skip),
            tail_buffer: parse_f64("TAIL_BUFFER_SECS", defaults.tail_buffer),
            probe_timeout: parse_secs("PROBE_TIMEOUT_SECS", defaults.probe_timeout),
            cut_timeout: parse_secs("CUT_TIMEOUT_SECS", defaults.cut_timeout),
            ffmpeg_path: lookup("FFMPEG_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            ffprobe_path: lookup("FFPROBE_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            log_json: lookup("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }

    /// Reject settings that would make every cut meaningless.
    pub fn validate(&self) -> CliResult<()> {
        if self.clip_duration <= 0.0 {
            return Err(CliError::config_error("CLIP_DURATION_SECS must be positive"));
        }
        if self.intro_skip < 0.0 || self.tail_buffer < 0.0 {
            return Err(CliError::config_error(
                "INTRO_SKIP_SECS and TAIL_BUFFER_SECS must not be negative",
            ));
        }
        if self.short_video_threshold < 0.0 {
            return Err(CliError::config_error(
                "SHORT_VIDEO_THRESHOLD_SECS must not be negative",
            ));
        }
        Ok(())
    }

    /// Settings for the clip extractor.
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            footage_dir: self.footage_dir.clone(),
            output_dir: self.assets_dir.clone(),
            clip_duration: self.clip_duration,
            policy: CutPolicy {
                short_video_threshold: self.short_video_threshold,
                intro_skip: self.intro_skip,
                tail_buffer: self.tail_buffer,
            },
            probe_timeout: self.probe_timeout,
            cut_timeout: self.cut_timeout,
        }
    }

    /// Discovered tool locations with configured overrides applied.
    pub fn tool_paths(&self) -> ToolPaths {
        ToolPaths::discover().with_overrides(self.ffprobe_path.clone(), self.ffmpeg_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.footage_dir, PathBuf::from("local_footage"));
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.variations_per_query, 3);
        assert_eq!(config.clip_duration, 4.0);
        assert_eq!(config.short_video_threshold, 10.0);
        assert_eq!(config.probe_timeout, Duration::from_secs(10));
        assert_eq!(config.cut_timeout, Duration::from_secs(30));
        assert!(!config.log_json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("LOCAL_FOOTAGE_DIR", "/media/footage"),
            ("VARIATIONS_PER_QUERY", "5"),
            ("CLIP_DURATION_SECS", "not-a-number"),
            ("CUT_TIMEOUT_SECS", "45"),
            ("FFMPEG_PATH", "/usr/bin/ffmpeg"),
            ("FFPROBE_PATH", "  "),
            ("LOG_FORMAT", "JSON"),
        ]));

        assert_eq!(config.footage_dir, PathBuf::from("/media/footage"));
        assert_eq!(config.variations_per_query, 5);
        assert_eq!(config.clip_duration, 4.0);
        assert_eq!(config.cut_timeout, Duration::from_secs(45));
        assert_eq!(config.ffmpeg_path, Some(PathBuf::from("/usr/bin/ffmpeg")));
        assert_eq!(config.ffprobe_path, None);
        assert!(config.log_json);
    }

    #[test]
    fn test_extractor_config_carries_policy() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ASSETS_DIR", "out"),
            ("INTRO_SKIP_SECS", "3.5"),
            ("SHORT_VIDEO_THRESHOLD_SECS", "12"),
        ]));
        let extractor = config.extractor_config();
        assert_eq!(extractor.output_dir, PathBuf::from("out"));
        assert_eq!(extractor.policy.intro_skip, 3.5);
        assert_eq!(extractor.policy.short_video_threshold, 12.0);
        assert_eq!(extractor.policy.tail_buffer, 2.0);
    }

    #[test]
    fn test_validate_rejects_zero_clip() {
        let config = AppConfig {
            clip_duration: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CliError::ConfigError(_))));
    }
}
