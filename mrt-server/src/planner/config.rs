//! Search configuration for the route planner.

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Upper bound on hops, in both modes.
    /// Paths longer than this are never reported.
    pub max_hops: u32,
}

impl SearchConfig {
    /// Create a new configuration with the given bound.
    pub fn new(max_hops: u32) -> Self {
        Self { max_hops }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_hops: 1000 }
    }
}
