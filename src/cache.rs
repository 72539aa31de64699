use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, UpdaterError};
use crate::fetcher::{GitHubReleaseFetcher, ReleaseFetcher};
use crate::types::{CacheEntry, ReleaseMetadata, UpdaterConfig};

/// Read-through cache holding the latest release for one repository.
///
/// Entries expire lazily: an entry past its expiry is never returned, the next
/// [`get`](VersionCache::get) fetches instead. Fetch failures are logged and
/// reported as `None`; nothing is cached for them.
pub struct VersionCache {
    fetcher: Arc<dyn ReleaseFetcher>,
    clock: Arc<dyn Clock>,
    repo: String,
    ttl: TimeDelta,
    cache_file_path: Option<String>,
    // Held across the fetch so overlapping lookups share one request.
    entry: Mutex<Option<CacheEntry>>,
}

impl VersionCache {
    /// Creates a cache backed by the GitHub API and the system clock.
    ///
    /// If a cache file path is configured and the file exists, the entry is loaded from disk.
    pub fn new(config: &UpdaterConfig) -> Result<Self> {
        let fetcher = GitHubReleaseFetcher::new(config)?;
        Self::with_parts(config, Arc::new(fetcher), Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit fetcher and clock.
    pub fn with_parts(
        config: &UpdaterConfig,
        fetcher: Arc<dyn ReleaseFetcher>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        // Validate cache file path (parent directory must exist)
        if let Some(ref path) = config.cache_file_path {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(UpdaterError::InvalidCacheFilePath(path.clone()));
                }
            }
        }

        let entry = config
            .cache_file_path
            .as_deref()
            .and_then(load_entry_from_disk)
            .filter(|entry| {
                let same_repo = entry.repo == config.repo;
                if !same_repo {
                    debug!(
                        cached = %entry.repo,
                        repo = %config.repo,
                        "ignoring release cache file written for another repository"
                    );
                }
                same_repo
            });

        Ok(Self {
            fetcher,
            clock,
            repo: config.repo.clone(),
            ttl: TimeDelta::from_std(config.ttl).unwrap_or(TimeDelta::MAX),
            cache_file_path: config.cache_file_path.clone(),
            entry: Mutex::new(entry),
        })
    }

    /// Returns the cached release if it is still fresh, otherwise fetches and caches it.
    pub async fn get(&self) -> Option<ReleaseMetadata> {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.is_fresh(self.clock.now()) {
                debug!(tag = %cached.value.tag_name, "release cache hit");
                return Some(cached.value.clone());
            }
            debug!(expired_at = %cached.expires_at, "release cache entry expired");
            *entry = None;
        }

        let release = match self.fetcher.fetch_latest().await {
            Ok(release) => release,
            Err(err) => {
                warn!(error = %err, "could not fetch latest release");
                return None;
            }
        };

        let fresh = CacheEntry {
            repo: self.repo.clone(),
            value: release.clone(),
            expires_at: self.expiry_from(self.clock.now()),
        };
        debug!(tag = %release.tag_name, expires_at = %fresh.expires_at, "cached latest release");

        if let Some(ref path) = self.cache_file_path {
            if let Err(err) = save_entry_to_disk(path, &fresh).await {
                warn!(error = %err, path = %path, "could not write release cache file");
            }
        }

        *entry = Some(fresh);
        Some(release)
    }

    /// Drops the cached release, in memory and on disk.
    pub async fn invalidate(&self) {
        let mut entry = self.entry.lock().await;
        *entry = None;

        if let Some(ref path) = self.cache_file_path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => warn!(error = %err, path = %path, "could not remove release cache file"),
            }
        }
        debug!("release cache invalidated");
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

fn load_entry_from_disk(path: &str) -> Option<CacheEntry> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

async fn save_entry_to_disk(path: &str, entry: &CacheEntry) -> Result<()> {
    let content = serde_json::to_string(entry)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}
