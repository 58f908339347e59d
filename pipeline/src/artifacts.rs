//! Artifact files: `<stem>.txt` (raw input) and `<stem>_analysis.txt` (report), one pair per
//! conversation, overwritten on every run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

use crate::error::StorageError;

pub const RAW_SUFFIX: &str = ".txt";
pub const ANALYSIS_SUFFIX: &str = "_analysis.txt";

const MAX_STEM_CHARS: usize = 120;
const EMPTY_STEM: &str = "untitled";

/// Filesystem-safe file stem for a conversation title.
///
/// Path separators, reserved characters and control characters become `_`; trailing dots and
/// spaces are trimmed; the result is capped at 120 chars and never empty.
pub fn safe_file_stem(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .take(MAX_STEM_CHARS)
        .collect();
    let trimmed = replaced.trim().trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        EMPTY_STEM.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Writes artifacts under one directory and hands out a per-stem lock.
pub struct ArtifactStore {
    dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the artifacts directory if missing.
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError {
                path: self.dir.clone(),
                source,
            })
    }

    pub fn raw_path(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}{}", safe_file_stem(title), RAW_SUFFIX))
    }

    pub fn analysis_path(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}{}", safe_file_stem(title), ANALYSIS_SUFFIX))
    }

    /// Exclusive access to the artifact pair of `title`. Titles with the same stem share a lock.
    ///
    /// Entries nobody holds or waits on are dropped on each call, so the map only tracks stems in use.
    pub async fn lock(&self, title: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.retain(|_, l| Arc::strong_count(l) > 1);
            locks
                .entry(safe_file_stem(title))
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    pub async fn write_raw(&self, title: &str, text: &str) -> Result<PathBuf, StorageError> {
        write_file(self.raw_path(title), text).await
    }

    pub async fn write_analysis(&self, title: &str, text: &str) -> Result<PathBuf, StorageError> {
        write_file(self.analysis_path(title), text).await
    }
}

async fn write_file(path: PathBuf, text: &str) -> Result<PathBuf, StorageError> {
    match tokio::fs::write(&path, text).await {
        Ok(()) => {
            debug!(path = %path.display(), bytes = text.len(), "Artifact written");
            Ok(path)
        }
        Err(source) => Err(StorageError { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_safe_file_stem() {
        assert_eq!(safe_file_stem("Team"), "Team");
        assert_eq!(safe_file_stem("a/b\\c:d*e?f\"g<h>i|j"), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(safe_file_stem("line\nbreak"), "line_break");
        assert_eq!(safe_file_stem("dots... "), "dots");
        assert_eq!(safe_file_stem("Команда Ops"), "Команда Ops");
        assert_eq!(safe_file_stem(""), "untitled");
        assert_eq!(safe_file_stem(".."), "untitled");
        assert_eq!(safe_file_stem("../etc/passwd"), ".._etc_passwd");
    }

    #[test]
    fn test_safe_file_stem_caps_length() {
        let long = "я".repeat(500);
        assert_eq!(safe_file_stem(&long).chars().count(), 120);
    }

    #[tokio::test]
    async fn test_writes_both_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path().join("chats"));
        store.ensure_dir().await.unwrap();

        let raw = store.write_raw("Team/Ops", "a\nb").await.unwrap();
        let analysis = store.write_analysis("Team/Ops", "report").await.unwrap();

        assert_eq!(raw.file_name().unwrap(), "Team_Ops.txt");
        assert_eq!(analysis.file_name().unwrap(), "Team_Ops_analysis.txt");
        assert_eq!(std::fs::read_to_string(raw).unwrap(), "a\nb");
        assert_eq!(std::fs::read_to_string(analysis).unwrap(), "report");
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path().join("missing"));
        let err = store.write_raw("Team", "x").await.unwrap_err();
        assert!(err.path.ends_with("Team.txt"));
    }

    #[tokio::test]
    async fn test_lock_is_exclusive_per_stem() {
        let store = Arc::new(ArtifactStore::new("unused"));
        let guard = store.lock("Team").await;

        let other = store.clone();
        let same = tokio::spawn(async move {
            let _g = other.lock("Team").await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!same.is_finished());

        let _different = store.lock("Ops").await;
        drop(guard);
        same.await.unwrap();
    }

    fn tracked_stems(store: &ArtifactStore) -> Vec<String> {
        let mut stems: Vec<String> = store.locks.lock().unwrap().keys().cloned().collect();
        stems.sort();
        stems
    }

    #[tokio::test]
    async fn test_released_locks_are_pruned() {
        let store = ArtifactStore::new("unused");

        for n in 0..50 {
            let _guard = store.lock(&format!("Chat {}", n)).await;
        }
        assert_eq!(tracked_stems(&store), vec!["Chat 49".to_string()]);

        let held = store.lock("Team").await;
        let other = store.lock("Ops").await;
        assert_eq!(tracked_stems(&store), vec!["Ops".to_string(), "Team".to_string()]);

        drop(held);
        drop(other);
        let _next = store.lock("Dev").await;
        assert_eq!(tracked_stems(&store), vec!["Dev".to_string()]);
    }
}
