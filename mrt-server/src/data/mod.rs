//! Network snapshot loading and caching.

mod cache;
mod snapshot;

pub use cache::{CacheConfig, SnapshotSource};
pub use snapshot::{RailwaySnapshot, SnapshotError};
