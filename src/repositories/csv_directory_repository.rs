use crate::cache::TimedCache;
use crate::error::DirectoryResult;
use crate::mapping::company_name::EXPORT_SUFFIX;
use crate::repositories::in_memory_directory::InMemoryDirectory;
use crate::repositories::traits::CompanyRepository;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

const SNAPSHOT_KEY: &str = "directory";

/// Company repository backed by a directory of `.csv` exports.
///
/// The whole directory is parsed into an [`InMemoryDirectory`] snapshot on first use
/// and kept for the cache TTL. Unreadable files are logged and left out. Concurrent
/// callers that find the cache stale share a single rebuild.
pub struct CsvDirectoryRepository {
    dir: PathBuf,
    cache: TimedCache<&'static str, Arc<InMemoryDirectory>>,
    rebuild: Mutex<()>,
}

impl CsvDirectoryRepository {
    /// Create a repository reading exports from `dir`.
    ///
    /// A TTL of zero disables caching: every snapshot re-reads the directory.
    pub fn new(dir: impl Into<PathBuf>, cache_ttl_secs: u64) -> Self {
        Self {
            dir: dir.into(),
            cache: TimedCache::new(cache_ttl_secs),
            rebuild: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn load_snapshot(&self) -> DirectoryResult<Arc<InMemoryDirectory>> {
        tracing::info!(dir = %self.dir.display(), "Loading client exports");
        let start = std::time::Instant::now();

        let exports = self.read_exports().await?;
        let snapshot = Arc::new(InMemoryDirectory::from_exports(exports));

        tracing::info!(
            "Export directory loaded in {}ms ({} companies, {} clients)",
            start.elapsed().as_millis(),
            snapshot.len(),
            snapshot.total_clients()
        );

        self.cache.insert(SNAPSHOT_KEY, snapshot.clone());
        Ok(snapshot)
    }

    /// Drop the cached snapshot so the next call re-reads the directory.
    pub fn invalidate(&self) {
        self.cache.remove(&SNAPSHOT_KEY);
        tracing::debug!("Export directory cache invalidated");
    }

    /// Read every `.csv` file in the directory as `(file_name, content)`, sorted by name.
    async fn read_exports(&self) -> DirectoryResult<Vec<(String, String)>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut file_names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.ends_with(EXPORT_SUFFIX) {
                file_names.push(file_name);
            }
        }
        file_names.sort();

        let mut exports = Vec::with_capacity(file_names.len());
        for file_name in file_names {
            match tokio::fs::read(self.dir.join(&file_name)).await {
                Ok(bytes) => {
                    let content = String::from_utf8_lossy(&bytes).into_owned();
                    exports.push((file_name, content));
                }
                Err(e) => {
                    tracing::warn!(file = %file_name, error = %e, "Skipping unreadable export");
                }
            }
        }

        Ok(exports)
    }
}

#[async_trait]
impl CompanyRepository for CsvDirectoryRepository {
    /// Current snapshot, parsing the directory if the cached one is missing or stale.
    async fn snapshot(&self) -> DirectoryResult<Arc<InMemoryDirectory>> {
        if let Some(snapshot) = self.cache.get(&SNAPSHOT_KEY) {
            tracing::debug!("Using cached export directory");
            return Ok(snapshot);
        }

        let _guard = self.rebuild.lock().await;

        // Another caller may have rebuilt while we waited
        if let Some(snapshot) = self.cache.get(&SNAPSHOT_KEY) {
            return Ok(snapshot);
        }

        self.load_snapshot().await
    }
}
