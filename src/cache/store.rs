//! File-backed cache storage
//!
//! One JSON file per hashed key under the cache directory, each holding the
//! write timestamp and the cached payload. Entries past the TTL are treated
//! as absent at read time rather than deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::key::cache_key;
use crate::error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

/// On-disk record layout: ISO-8601 timestamp plus arbitrary JSON payload
#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    timestamp: DateTime<Utc>,
    data: Value,
}

/// Aggregate numbers for `giftscope cache stats`
#[derive(Debug, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub fresh: usize,
    pub total_bytes: u64,
}

/// Result of clearing the cache
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// File-per-key cache store with time-based staleness
pub struct CacheStore {
    dir: PathBuf,
    ttl: Duration,
}

impl CacheStore {
    /// Open (creating if needed) a cache store at the given directory
    pub fn open_at(dir: &Path, ttl: Duration) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        Ok(Self {
            dir: dir.to_path_buf(),
            ttl,
        })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(key)))
    }

    /// Get the cached payload for a logical key, if present and fresh.
    ///
    /// Expired, corrupt, or unreadable entries all read as `None`; a broken
    /// cache must never take an analysis down with it.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Utc::now())
    }

    /// Staleness-tolerant read used by the network-failure fallback path
    pub fn get_stale(&self, key: &str) -> Option<Value> {
        self.read_record(key).map(|record| record.data)
    }

    fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Value> {
        let record = self.read_record(key)?;
        let age = now.signed_duration_since(record.timestamp);

        match age.to_std() {
            Ok(age) if age < self.ttl => Some(record.data),
            // Future timestamps (clock skew) also read as fresh
            Err(_) => Some(record.data),
            Ok(_) => {
                log::debug!("Cache entry expired: {}", key);
                None
            }
        }
    }

    fn read_record(&self, key: &str) -> Option<CacheRecord> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Store a payload under a logical key, overwriting any prior entry
    pub fn put(&self, key: &str, data: &Value) -> Result<()> {
        self.put_at(key, data, Utc::now())
    }

    fn put_at(&self, key: &str, data: &Value, now: DateTime<Utc>) -> Result<()> {
        let record = CacheRecord {
            timestamp: now,
            data: data.clone(),
        };
        let contents = serde_json::to_string(&record)
            .map_err(|e| CacheError::Io(format!("Failed to serialize cache entry: {}", e)))?;

        std::fs::write(self.entry_path(key), contents)
            .map_err(|e| CacheError::Io(format!("Failed to write cache entry: {}", e)))?;

        Ok(())
    }

    /// Remove every cache entry and report how many were deleted
    pub fn clear_all(&self) -> Result<ClearStats> {
        let mut removed = 0;
        for entry in self.list_entry_files()? {
            match std::fs::remove_file(&entry) {
                Ok(()) => removed += 1,
                Err(e) => log::warn!("Failed to remove {}: {}", entry.display(), e),
            }
        }

        Ok(ClearStats {
            entries_removed: removed,
        })
    }

    /// Count entries, fresh entries, and total size on disk
    pub fn stats(&self) -> Result<CacheStats> {
        let now = Utc::now();
        let mut stats = CacheStats::default();

        for path in self.list_entry_files()? {
            stats.entries += 1;
            if let Ok(meta) = std::fs::metadata(&path) {
                stats.total_bytes += meta.len();
            }

            let fresh = std::fs::read_to_string(&path)
                .ok()
                .and_then(|c| serde_json::from_str::<CacheRecord>(&c).ok())
                .map(|r| match now.signed_duration_since(r.timestamp).to_std() {
                    Ok(age) => age < self.ttl,
                    Err(_) => true,
                })
                .unwrap_or(false);
            if fresh {
                stats.fresh += 1;
            }
        }

        Ok(stats)
    }

    fn list_entry_files(&self) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(&self.dir)
            .map_err(|e| CacheError::Io(format!("Failed to read cache dir: {}", e)))?;

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        Ok(files)
    }
}
