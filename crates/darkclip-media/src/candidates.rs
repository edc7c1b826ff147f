//! Local footage enumeration.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// File extension accepted as local footage.
pub const FOOTAGE_EXTENSION: &str = "mp4";

/// List `.mp4` files directly inside `dir`, sorted by file name.
///
/// A missing or unreadable directory yields an empty list.
pub async fn list_candidates(dir: impl AsRef<Path>) -> Vec<PathBuf> {
    let dir = dir.as_ref();

    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read local footage directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut candidates = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let path = entry.path();
                if is_footage_file(&path) && path.is_file() {
                    candidates.push(path);
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Error while listing {}: {}", dir.display(), e);
                break;
            }
        }
    }

    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    candidates
}

/// Whether `path` has the footage extension (case-insensitive).
pub fn is_footage_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(FOOTAGE_EXTENSION))
}

/// Lowercased file name without extension, used for matching.
pub fn match_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
