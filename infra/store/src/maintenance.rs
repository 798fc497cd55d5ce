use std::path::Path;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::{info, warn};

/// Temporary snapshots younger than this may still be in flight.
const STALE_AFTER: Duration = Duration::from_secs(300);

pub(crate) fn is_tmp_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(".tmp")
}

/// Removes temporary snapshot files left behind by interrupted writes.
pub(crate) async fn purge_stale_tmp(root: &Path) {
    let now = SystemTime::now();
    let (mut removed, mut failed) = (0_usize, 0_usize);

    let Ok(mut entries) = fs::read_dir(root).await else {
        return;
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        if !entry.file_name().to_str().is_some_and(is_tmp_name) {
            continue;
        }

        let stale = entry
            .metadata()
            .await
            .and_then(|meta| meta.modified())
            .is_ok_and(|modified| now.duration_since(modified).unwrap_or_default() >= STALE_AFTER);
        if !stale {
            continue;
        }

        match fs::remove_file(entry.path()).await {
            Ok(()) => removed += 1,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Failed to remove stale temp file");
                failed += 1;
            },
        }
    }

    if removed > 0 || failed > 0 {
        info!(removed, failed, "Cleaned up temporary snapshot files");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_hidden_tmp_files_qualify() {
        assert!(is_tmp_name(".67e55044-10b1-426f-9247-bb680e5fe0c8.3.tmp"));
        assert!(!is_tmp_name("67e55044-10b1-426f-9247-bb680e5fe0c8.json"));
        assert!(!is_tmp_name("notes.tmp"));
    }
}
