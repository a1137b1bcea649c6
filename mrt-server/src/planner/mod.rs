//! Route planner using depth-first search.
//!
//! This module implements the core algorithm that answers:
//! "What is the shortest way from this station to that one?"
//!
//! Routes are ranked either by stations travelled or by travel time at a
//! given departure instant; every route tied for the best cost is returned.

mod config;
mod render;
mod search;
mod timing;

pub use config::SearchConfig;
pub use render::{RouteLeg, StationStop, SuggestRoute};
pub use search::{
    InvalidOrderBy, OrderBy, Planner, SearchError, SearchRequest, SearchResult,
};
pub use timing::{ItineraryTiming, Segment, SegmentTiming, ride, walk};
