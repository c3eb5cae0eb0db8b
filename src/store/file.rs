//! Directory-backed store
//!
//! Each key is kept in its own `<key>.kv` file. Writes go to a hidden
//! temporary file first and are renamed into place, so a reader never sees a
//! half-written value and the last rename wins. Temporary files left behind
//! by a crash are removed by the next key listing once they are an hour old.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::KvStore;

const FILE_EXTENSION: &str = "kv";
const TMP_SUFFIX: &str = ".tmp";

/// Age after which an orphaned temporary file can no longer belong to an
/// in-flight write.
const STALE_TMP_AGE: Duration = Duration::from_secs(60 * 60);

// == File Store ==
/// Persistent key-value store rooted at a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    tmp_counter: AtomicU64,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            tmp_counter: AtomicU64::new(0),
        }
    }

    /// Creates a store in the platform cache directory
    /// (`~/.cache/movie_cache/` on Linux).
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn in_default_location() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", "movie_cache")?;
        Some(Self::new(dirs.cache_dir()))
    }

    /// Directory holding the store's files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, FILE_EXTENSION)))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{}.{}.{}{}", key, std::process::id(), n, TMP_SUFFIX))
    }

    async fn remove_if_stale(&self, path: &Path) {
        let modified = match fs::metadata(path).await.and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => return,
        };
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default();
        if age < STALE_TMP_AGE {
            return;
        }

        match fs::remove_file(path).await {
            Ok(()) => debug!("Removed stale temp file {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove stale temp file {}: {}", path.display(), e),
        }
    }
}

/// Keys map directly onto file names, so only a conservative character set
/// is accepted.
fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).await?;

        let tmp = self.tmp_path_for(key);
        if let Err(e) = fs::write(&tmp, value).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!("File store wrote {}", path.display());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn all_keys(&self) -> StoreResult<Vec<String>> {
        let mut dir = match fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let suffix = format!(".{}", FILE_EXTENSION);
        let mut keys = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with('.') {
                if name.ends_with(TMP_SUFFIX) {
                    self.remove_if_stale(&entry.path()).await;
                }
                continue;
            }
            if let Some(key) = name.strip_suffix(suffix.as_str()) {
                keys.push(key.to_string());
            }
        }

        Ok(keys)
    }
}
