use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::RawUser;

/// Consider a cached page stale after 10 minutes.
/// The upstream seed keeps page contents deterministic, so short-lived reuse
/// is safe while still bounding how old displayed data can get.
pub const CACHE_TTL_MINUTES: i64 = 10;

/// One cached page: immutable after creation, a re-fetch replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub page: u32,
    pub users: Vec<RawUser>,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(page: u32, users: Vec<RawUser>) -> Self {
        Self {
            page,
            users,
            fetched_at: Utc::now(),
        }
    }

    /// True while the entry's age is strictly under the TTL.
    pub fn is_fresh(&self) -> bool {
        Utc::now() - self.fetched_at < Duration::minutes(CACHE_TTL_MINUTES)
    }
}

/// Keyed, time-expiring store of raw pages with a write-behind disk mirror.
///
/// Only the fetch orchestrator mutates this; puts update memory synchronously
/// and mirror to disk in the background.
pub struct PageCache {
    entries: BTreeMap<u32, CacheEntry>,
    disk: Option<PathBuf>,
}

impl PageCache {
    /// Create a cache mirrored to `disk_dir`. If the directory cannot be
    /// created the cache silently degrades to memory-only.
    pub fn new(disk_dir: Option<PathBuf>) -> Self {
        let disk = disk_dir.and_then(|dir| match std::fs::create_dir_all(&dir) {
            Ok(()) => Some(dir),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cache dir unavailable, using memory-only cache");
                None
            }
        });

        Self {
            entries: BTreeMap::new(),
            disk,
        }
    }

    /// Memory-only cache with no durable mirror.
    pub fn in_memory() -> Self {
        Self::new(None)
    }

    fn page_path(dir: &Path, page: u32) -> PathBuf {
        dir.join(format!("page_{}.json", page))
    }

    /// True iff an entry exists for `page` and is younger than the TTL.
    pub fn is_valid(&self, page: u32) -> bool {
        self.entries.get(&page).is_some_and(CacheEntry::is_fresh)
    }

    pub fn get(&self, page: u32) -> Option<&CacheEntry> {
        self.entries.get(&page)
    }

    /// Create or replace the entry for `page` with a fresh timestamp.
    ///
    /// The in-memory map is updated synchronously; the disk mirror is written
    /// fire-and-forget on the blocking pool. A failed mirror write never
    /// fails the put.
    pub fn put(&mut self, page: u32, users: Vec<RawUser>) {
        let entry = CacheEntry::new(page, users);
        self.mirror_to_disk(&entry);
        self.entries.insert(page, entry);
    }

    fn mirror_to_disk(&self, entry: &CacheEntry) {
        let Some(dir) = &self.disk else { return };
        let path = Self::page_path(dir, entry.page);

        match serde_json::to_string(entry) {
            Ok(json) => {
                tokio::task::spawn_blocking(move || {
                    if let Err(e) = std::fs::write(&path, json) {
                        debug!(path = %path.display(), error = %e, "failed to mirror page to disk");
                    }
                });
            }
            Err(e) => debug!(page = entry.page, error = %e, "failed to serialize cache entry"),
        }
    }

    /// Load durably stored pages into memory.
    ///
    /// Runs once at startup, before the first lookup is trusted. Entries at
    /// or past the TTL are deleted from disk and skipped; unparseable files
    /// are treated as empty cache and deleted. Returns the number of pages
    /// loaded. No-op for memory-only caches.
    pub fn load_from_disk(&mut self) -> usize {
        let Some(dir) = self.disk.clone() else {
            return 0;
        };

        let read_dir = match std::fs::read_dir(&dir) {
            Ok(rd) => rd,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "failed to read cache dir");
                return 0;
            }
        };

        let mut loaded = 0;
        for dir_entry in read_dir.flatten() {
            let path = dir_entry.path();
            let name = dir_entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with("page_") || !name.ends_with(".json") {
                continue;
            }

            let entry = match Self::read_entry(&path) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable cache file, discarding");
                    let _ = std::fs::remove_file(&path);
                    continue;
                }
            };

            if !entry.is_fresh() {
                debug!(page = entry.page, "discarding expired cache file");
                let _ = std::fs::remove_file(&path);
                continue;
            }

            self.entries.insert(entry.page, entry);
            loaded += 1;
        }

        debug!(loaded, "cache loaded from disk");
        loaded
    }

    fn read_entry(path: &Path) -> Result<CacheEntry> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cache file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", path.display()))
    }

    /// Empty the in-memory map and remove all mirrored page files.
    pub fn clear(&mut self) {
        self.entries.clear();

        let Some(dir) = &self.disk else { return };
        let Ok(read_dir) = std::fs::read_dir(dir) else {
            return;
        };
        for dir_entry in read_dir.flatten() {
            let name = dir_entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with("page_") && name.ends_with(".json") {
                if let Err(e) = std::fs::remove_file(dir_entry.path()) {
                    debug!(file = %name, error = %e, "failed to remove cache file");
                }
            }
        }
    }

    /// Ascending page numbers with currently-valid entries.
    pub fn valid_pages(&self) -> Vec<u32> {
        self.entries
            .values()
            .filter(|e| e.is_fresh())
            .map(|e| e.page)
            .collect()
    }

    /// All valid records, ordered by ascending page then within-page order.
    pub fn all_valid_users(&self) -> Vec<RawUser> {
        self.entries
            .values()
            .filter(|e| e.is_fresh())
            .flat_map(|e| e.users.iter().cloned())
            .collect()
    }

    /// Count of valid records across pages.
    pub fn total_valid_users(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.is_fresh())
            .map(|e| e.users.len())
            .sum()
    }
}
