//! Caching layer for loaded snapshots.
//!
//! A snapshot is parsed once and shared behind an `Arc` by every query
//! until the entry expires, after which the next query reloads the file.
//! Snapshots are never mutated after construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use super::snapshot::{RailwaySnapshot, SnapshotError};

/// Configuration for the snapshot cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached snapshots.
    pub ttl: Duration,

    /// Maximum number of cached snapshots.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 8,
        }
    }
}

/// Snapshot file with caching.
pub struct SnapshotSource {
    path: PathBuf,
    snapshots: MokaCache<PathBuf, Arc<RailwaySnapshot>>,
}

impl SnapshotSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>, config: &CacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            path: path.into(),
            snapshots,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current snapshot, loading it if not cached.
    ///
    /// Concurrent callers share a single load. A failed load is not cached.
    pub async fn get(&self) -> Result<Arc<RailwaySnapshot>, Arc<SnapshotError>> {
        self.snapshots
            .try_get_with(self.path.clone(), async {
                RailwaySnapshot::load(&self.path).await.map(Arc::new)
            })
            .await
    }

    /// Drop the cached snapshot so the next query reloads the file.
    pub fn invalidate(&self) {
        self.snapshots.invalidate_all();
    }
}
