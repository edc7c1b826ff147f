//! Filesystem utilities.

use std::path::Path;
use tokio::fs;

use crate::error::{MediaError, MediaResult};

/// Copy `src` to `dst` byte-for-byte, creating the parent directory.
///
/// The copy is written to a sibling temporary file first and renamed into
/// place, so `dst` never holds a partial file.
pub async fn copy_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<u64> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if !src.exists() {
        return Err(MediaError::FileNotFound(src.to_path_buf()));
    }

    if let Some(parent) = dst.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let tmp_dst = dst.with_extension("tmp");

    let bytes = fs::copy(src, &tmp_dst).await.map_err(|e| {
        tracing::error!(
            "Failed to copy {} -> {}: {}",
            src.display(),
            tmp_dst.display(),
            e
        );
        MediaError::from(e)
    })?;

    fs::rename(&tmp_dst, dst).await.map_err(|e| {
        let _ = std::fs::remove_file(&tmp_dst);
        tracing::error!(
            "Failed to rename temp file {} -> {}: {}",
            tmp_dst.display(),
            dst.display(),
            e
        );
        MediaError::from(e)
    })?;

    Ok(bytes)
}

/// Size of `path` in bytes, or `None` if it does not exist or is not a file.
pub async fn file_size(path: impl AsRef<Path>) -> Option<u64> {
    let meta = fs::metadata(path.as_ref()).await.ok()?;
    meta.is_file().then(|| meta.len())
}
