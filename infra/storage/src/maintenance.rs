use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{error, info};
use walkdir::{DirEntry, WalkDir};

pub(crate) const TMP_MARKER: &str = ".tnodetmp.";

/// Removes temp files left behind by interrupted writes.
pub(crate) async fn purge_tmp(dir: &Path) {
    let dir = dir.to_path_buf();
    let now = SystemTime::now();
    let threshold = Duration::from_secs(300);

    match tokio::task::spawn_blocking(move || remove_stale(&dir, now, threshold)).await {
        Ok((removed, failed)) if removed > 0 || failed > 0 => {
            info!(removed, failed, "Cleaned up temporary files");
        },
        Err(e) => {
            error!(error = %e, "Temp file cleanup task panicked");
        },
        _ => {},
    }
}

fn remove_stale(dir: &Path, now: SystemTime, threshold: Duration) -> (usize, usize) {
    let mut removed = 0;
    let mut failed = 0;

    WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .flatten()
        .filter(|e| is_tmp(e) && is_stale(e, now, threshold))
        .for_each(|entry| match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "Temp removal failed");
                failed += 1;
            },
        });

    (removed, failed)
}

fn is_tmp(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER))
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    std::fs::metadata(entry.path())
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > threshold)
}
