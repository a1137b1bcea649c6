//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::planner::{RouteLeg, SearchResult, StationStop, SuggestRoute};

/// Query string of `GET /api/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Origin station name
    #[serde(default)]
    pub from: String,

    /// Destination station name
    #[serde(default)]
    pub to: String,

    /// Departure in "YYYY-MM-DD HH:MM" format (defaults to now)
    pub time: Option<String>,

    /// "distance" or "time" (defaults to distance)
    pub order_by: Option<String>,
}

/// Outcome of a route search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Failed,
}

/// Response body of `GET /api/search`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub result: ResultStatus,

    /// "N route(s) found", or why the search failed
    pub description: String,

    /// One entry per tied shortest route; empty on failure
    pub suggest_routes: Vec<SuggestRouteResult>,
}

impl SearchResponse {
    pub fn success(result: &SearchResult) -> Self {
        Self {
            result: ResultStatus::Success,
            description: result.description(),
            suggest_routes: result
                .routes
                .iter()
                .map(SuggestRouteResult::from_route)
                .collect(),
        }
    }

    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            result: ResultStatus::Failed,
            description: description.into(),
            suggest_routes: Vec::new(),
        }
    }
}

/// A suggested route.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestRouteResult {
    pub summary: String,

    /// Station codes across all legs, in travel order
    pub take_stations: Vec<String>,

    pub total_station: u32,

    /// Minutes, including interchanges
    pub total_cost: u32,

    pub total_interchange: u32,

    /// One entry per line ridden
    pub routes: Vec<RouteResult>,
}

/// One leg of a suggested route.
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResult {
    /// Line code
    pub line: String,

    /// e.g. "Botanic Gardens->Bugis"
    pub direction: String,

    pub from_station: String,
    pub to_station: String,

    /// Riding minutes for this leg
    pub time_cost: u32,

    pub take_stations: Vec<StationInfo>,
}

/// A station passed on a leg.
#[derive(Debug, Serialize, Deserialize)]
pub struct StationInfo {
    pub code: String,
    pub name: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl SuggestRouteResult {
    /// Create from a planner route.
    pub fn from_route(route: &SuggestRoute) -> Self {
        Self {
            summary: route.summary.clone(),
            take_stations: route.take_stations.iter().map(|s| s.code.clone()).collect(),
            total_station: route.total_station,
            total_cost: route.total_cost,
            total_interchange: route.total_interchange,
            routes: route.routes.iter().map(RouteResult::from_leg).collect(),
        }
    }
}

impl RouteResult {
    /// Create from a planner leg.
    pub fn from_leg(leg: &RouteLeg) -> Self {
        Self {
            line: leg.line.clone(),
            direction: leg.direction.clone(),
            from_station: leg.from_station.clone(),
            to_station: leg.to_station.clone(),
            time_cost: leg.time_cost,
            take_stations: leg.take_stations.iter().map(StationInfo::from_stop).collect(),
        }
    }
}

impl StationInfo {
    pub fn from_stop(stop: &StationStop) -> Self {
        Self {
            code: stop.code.clone(),
            name: stop.name.clone(),
        }
    }
}

/// Capitalize every letter that follows a non-letter and lowercase the
/// rest, so "one-north" becomes "One-North". Runs of whitespace collapse
/// to a single space.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut after_letter = false;
            word.chars()
                .flat_map(|c| {
                    let upper = !after_letter;
                    after_letter = c.is_alphabetic();
                    if upper {
                        c.to_uppercase().collect::<Vec<_>>()
                    } else {
                        c.to_lowercase().collect::<Vec<_>>()
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<String>>()
        .join(" ")
}
