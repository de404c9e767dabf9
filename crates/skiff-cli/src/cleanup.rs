//! Removal of build output directories.
//!
//! Failures are logged and never fail the command that triggered them.

use std::path::{Path, PathBuf};

/// What happened to one output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed(PathBuf),
    Missing(PathBuf),
    Failed(PathBuf, String),
}

/// Remove every directory in `paths` that exists.
pub async fn remove_output_dirs(paths: &[PathBuf]) -> Vec<Removal> {
    let mut removals = Vec::with_capacity(paths.len());
    for path in paths {
        removals.push(remove_output_dir(path).await);
    }
    removals
}

pub async fn remove_output_dir(path: &Path) -> Removal {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::debug!(path = %path.display(), "output directory does not exist");
        return Removal::Missing(path.to_path_buf());
    }

    tracing::info!("Remove {}", path.display());
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => {
            tracing::info!("Removing {} done", path.display());
            Removal::Removed(path.to_path_buf())
        }
        Err(err) => {
            tracing::error!("Error occurred while removing {}: {err}", path.display());
            Removal::Failed(path.to_path_buf(), err.to_string())
        }
    }
}

/// Remove `paths` unless `keep` is set.
pub async fn cleanup(paths: &[PathBuf], keep: bool) -> Vec<Removal> {
    if keep {
        for path in paths {
            tracing::debug!("Keeping {}", path.display());
        }
        return Vec::new();
    }
    remove_output_dirs(paths).await
}
