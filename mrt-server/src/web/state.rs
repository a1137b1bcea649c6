//! Application state for the web layer.

use std::sync::Arc;

use crate::data::SnapshotSource;
use crate::planner::SearchConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached network snapshot
    pub snapshots: Arc<SnapshotSource>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(snapshots: SnapshotSource, config: SearchConfig) -> Self {
        Self {
            snapshots: Arc::new(snapshots),
            config: Arc::new(config),
        }
    }
}
