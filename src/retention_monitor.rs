use std::{
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tokio::{task::JoinHandle, time};
use tracing::{debug, error, info, warn};

use crate::{errors::Result, storage::is_generated_file_name};

/// Retention monitor that periodically deletes expired generated audio
pub struct RetentionMonitor;

impl RetentionMonitor {
    /// Start the sweeping task. Returns `None` when retention is unbounded.
    pub fn start(root: PathBuf, max_age: Duration, interval: Duration) -> Option<JoinHandle<()>> {
        if max_age.is_zero() {
            info!("Retention disabled, generated audio is kept forever");
            return None;
        }

        Some(tokio::spawn(async move {
            info!(
                max_age_secs = max_age.as_secs(),
                interval_secs = interval.as_secs(),
                "Starting retention monitor"
            );
            let mut interval = time::interval(interval);

            loop {
                interval.tick().await;
                match Self::sweep(&root, max_age, SystemTime::now()).await {
                    Ok(0) => debug!("No expired audio files"),
                    Ok(removed) => info!(removed, "Removed expired audio files"),
                    Err(err) => error!(error = %err, "Retention sweep failed"),
                }
            }
        }))
    }

    /// Delete generated audio files last modified more than `max_age` before `now`.
    /// Files the relay did not generate are left alone.
    pub async fn sweep(root: &Path, max_age: Duration, now: SystemTime) -> Result<usize> {
        let mut entries = tokio::fs::read_dir(root).await?;
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };

            if !is_generated_file_name(name) {
                continue;
            }

            let modified = match modified_at(&entry.path()).await {
                Ok(Some(modified)) => modified,
                Ok(None) => continue,
                // Removed between listing and stat.
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => {
                    warn!(file = name, error = %err, "Cannot read audio file metadata");
                    continue;
                }
            };

            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);

            if age <= max_age {
                continue;
            }

            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => removed += 1,
                // Already gone; the caller may have removed it.
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => warn!(file = name, error = %err, "Cannot remove expired audio"),
            }
        }

        Ok(removed)
    }
}

/// Modification time of a regular file, `None` for anything else.
async fn modified_at(path: &Path) -> std::io::Result<Option<SystemTime>> {
    let metadata = tokio::fs::symlink_metadata(path).await?;
    if !metadata.is_file() {
        return Ok(None);
    }

    metadata.modified().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweep_removes_only_expired_generated_files() {
        let dir = tempfile::tempdir().unwrap();
        let generated = dir.path().join("output_1_abc.wav");
        let foreign = dir.path().join("keep.wav");
        std::fs::write(&generated, b"RIFF").unwrap();
        std::fs::write(&foreign, b"RIFF").unwrap();

        let later = SystemTime::now() + Duration::from_secs(7200);
        let removed = RetentionMonitor::sweep(dir.path(), Duration::from_secs(3600), later)
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert!(!generated.exists());
        assert!(foreign.exists());
    }

    #[tokio::test]
    async fn test_sweep_keeps_fresh_files() {
        let dir = tempfile::tempdir().unwrap();
        let generated = dir.path().join("output_2_def.wav");
        std::fs::write(&generated, b"RIFF").unwrap();

        let removed =
            RetentionMonitor::sweep(dir.path(), Duration::from_secs(3600), SystemTime::now())
                .await
                .unwrap();

        assert_eq!(removed, 0);
        assert!(generated.exists());
    }

    #[tokio::test]
    async fn test_modified_at_vanished_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = modified_at(&dir.path().join("output_4_gone.wav"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_sweep_skips_non_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("output_5_dir.wav");
        let generated = dir.path().join("output_6_jkl.wav");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(&generated, b"RIFF").unwrap();

        assert!(modified_at(&nested).await.unwrap().is_none());

        let later = SystemTime::now() + Duration::from_secs(7200);
        let removed = RetentionMonitor::sweep(dir.path(), Duration::from_secs(3600), later)
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert!(nested.exists());
        assert!(!generated.exists());
    }

    #[tokio::test]
    async fn test_sweep_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = RetentionMonitor::sweep(
            &dir.path().join("missing"),
            Duration::from_secs(1),
            SystemTime::now(),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_start_disabled_with_zero_max_age() {
        let dir = tempfile::tempdir().unwrap();
        let handle = RetentionMonitor::start(
            dir.path().to_path_buf(),
            Duration::ZERO,
            Duration::from_secs(1),
        );
        assert!(handle.is_none());
    }

    #[tokio::test]
    async fn test_start_sweeps_in_background() {
        let dir = tempfile::tempdir().unwrap();
        let generated = dir.path().join("output_3_ghi.wav");
        std::fs::write(&generated, b"RIFF").unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;

        let handle = RetentionMonitor::start(
            dir.path().to_path_buf(),
            Duration::from_secs(1),
            Duration::from_millis(50),
        )
        .unwrap();

        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.abort();

        assert!(!generated.exists());
    }
}
