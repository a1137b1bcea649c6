//! Shortest-route search.
//!
//! Depth-first search over (line, station) frames. Each frame either
//! reaches the destination on its current line, or fans out to every
//! interchange along the line onto a line not yet used by the path.
//! A global best hop count prunes frames that are already longer, and
//! every complete path matching it is kept.
//!
//! Both modes rank by hops. `time` mode also runs a simulated clock,
//! charged hop by hop against the time category at each hop's own
//! instant, and never boards a line that is closed at that clock.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::domain::{ConfigError, LineId, Network, StationId, TimeCostModel};

use super::config::SearchConfig;
use super::render::{Renderer, SuggestRoute};
use super::timing::{self, Segment};

/// What a search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    /// Fewest stations travelled; operating hours are ignored.
    #[default]
    Distance,
    /// Fewest stations travelled on lines running at the simulated clock.
    Time,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Distance => "distance",
            OrderBy::Time => "time",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown ordering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a valid order_by, expected distance or time")]
pub struct InvalidOrderBy(pub String);

impl FromStr for OrderBy {
    type Err = InvalidOrderBy;

    /// Parse case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(OrderBy::Distance),
            "time" => Ok(OrderBy::Time),
            _ => Err(InvalidOrderBy(s.to_string())),
        }
    }
}

/// Error from route search.
///
/// The display text of the user-facing variants is the description
/// returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// No station with this name
    #[error("{0}  is not contain")]
    StationNotFound(String),

    /// Origin and destination are the same station
    #[error("{0} and {1} is the same station")]
    SameStation(String, String),

    /// Station not yet opened, or no serving line running at departure
    #[error("{0} is not in operation or opened")]
    NotInOperation(String),

    /// Search finished without reaching the destination
    #[error("Sorry, no route found !")]
    NoRoute,

    /// The snapshot itself is broken
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SearchError {
    /// Returns true for snapshot faults rather than bad queries.
    pub fn is_config(&self) -> bool {
        matches!(self, SearchError::Config(_))
    }
}

/// Request for route search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Origin station name (case-insensitive).
    pub from: String,

    /// Destination station name (case-insensitive).
    pub to: String,

    /// Departure instant.
    pub departure: NaiveDateTime,

    pub order_by: OrderBy,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        departure: NaiveDateTime,
        order_by: OrderBy,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            departure,
            order_by,
        }
    }
}

/// Result of route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Every route tied for the fewest hops, in discovery order.
    pub routes: Vec<SuggestRoute>,

    /// Number of search frames entered.
    pub frames_explored: usize,
}

impl SearchResult {
    pub fn description(&self) -> String {
        format!("{} route(s) found", self.routes.len())
    }
}

/// Position of the rider during search.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Hops ridden so far.
    hops: u32,
    station: StationId,
    line: LineId,
    clock: NaiveDateTime,
}

/// Per-query constants.
#[derive(Debug, Clone, Copy)]
struct Query {
    destination: StationId,
    date: NaiveDate,
    order_by: OrderBy,
}

/// Path under construction plus the best paths found so far.
///
/// `segments` and `lines_used` grow and shrink in step with the
/// recursion; every push has a matching pop on the way back out.
#[derive(Debug)]
struct SearchState {
    segments: Vec<Segment>,
    lines_used: Vec<LineId>,
    best_hops: u32,
    best: Vec<Vec<Segment>>,
    frames_explored: usize,
}

impl SearchState {
    fn new(bound: u32) -> Self {
        Self {
            segments: Vec::new(),
            lines_used: Vec::new(),
            best_hops: bound,
            best: Vec::new(),
            frames_explored: 0,
        }
    }

    /// Offer the current path as a complete route of `total` hops.
    fn record(&mut self, total: u32) {
        if total < self.best_hops {
            self.best_hops = total;
            self.best.clear();
            self.best.push(self.segments.clone());
        } else if total == self.best_hops {
            self.best.push(self.segments.clone());
        }
    }
}

/// Route planner over one network snapshot.
pub struct Planner<'a> {
    network: &'a Network,
    model: &'a TimeCostModel,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, model: &'a TimeCostModel, config: &'a SearchConfig) -> Self {
        Self {
            network,
            model,
            config,
        }
    }

    /// Find every shortest route between two named stations.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let origin = self
            .network
            .find_station(&request.from)
            .ok_or_else(|| SearchError::StationNotFound(request.from.clone()))?;
        let destination = self
            .network
            .find_station(&request.to)
            .ok_or_else(|| SearchError::StationNotFound(request.to.clone()))?;

        if origin == destination {
            return Err(SearchError::SameStation(
                request.from.clone(),
                request.to.clone(),
            ));
        }

        if !self.is_operating(origin, request)? {
            return Err(SearchError::NotInOperation(request.from.clone()));
        }
        if !self.is_operating(destination, request)? {
            return Err(SearchError::NotInOperation(request.to.clone()));
        }

        let query = Query {
            destination,
            date: request.departure.date(),
            order_by: request.order_by,
        };
        let mut state = SearchState::new(self.config.max_hops);

        let start = self.network.station(origin);
        for &line in start.lines() {
            if !start.is_open_on(line, query.date) {
                continue;
            }
            let frame = Frame {
                hops: 0,
                station: origin,
                line,
                clock: request.departure,
            };
            state.lines_used.push(line);
            let result = self.explore(&query, frame, &mut state);
            state.lines_used.pop();
            result?;
        }

        debug!(
            from = %request.from,
            to = %request.to,
            order_by = %request.order_by,
            frames = state.frames_explored,
            routes = state.best.len(),
            best_hops = state.best_hops,
            "Route search complete"
        );

        if state.best.is_empty() {
            return Err(SearchError::NoRoute);
        }

        let renderer = Renderer::new(
            self.network,
            self.model,
            request.order_by,
            request.departure,
        );
        let routes = state
            .best
            .iter()
            .map(|segments| renderer.render(segments))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchResult {
            routes,
            frames_explored: state.frames_explored,
        })
    }

    /// Opened on some line before the departure date and, in `time`
    /// mode, served by a line running at departure.
    fn is_operating(
        &self,
        station: StationId,
        request: &SearchRequest,
    ) -> Result<bool, ConfigError> {
        let date = request.departure.date();
        let station = self.network.station(station);
        if !station.is_opened(date) {
            return Ok(false);
        }
        if request.order_by == OrderBy::Distance {
            return Ok(true);
        }
        for &line in station.lines() {
            if station.is_open_on(line, date)
                && self.is_running(line, request.departure, request.order_by)?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether `line` can be ridden at `clock`. Always true in `distance` mode.
    fn is_running(
        &self,
        line: LineId,
        clock: NaiveDateTime,
        order_by: OrderBy,
    ) -> Result<bool, ConfigError> {
        match order_by {
            OrderBy::Distance => Ok(true),
            OrderBy::Time => {
                let category = self.model.category_at(clock);
                Ok(self.network.line(line).cost(category)?.is_open)
            }
        }
    }

    fn explore(
        &self,
        query: &Query,
        frame: Frame,
        state: &mut SearchState,
    ) -> Result<(), ConfigError> {
        state.frames_explored += 1;

        if frame.hops > state.best_hops {
            trace!(hops = frame.hops, best = state.best_hops, "pruned");
            return Ok(());
        }

        if !self.is_running(frame.line, frame.clock, query.order_by)? {
            trace!(
                line = %self.network.line(frame.line).code(),
                clock = %frame.clock,
                "line closed"
            );
            return Ok(());
        }

        let network = self.network;
        let destination = network.station(query.destination);
        if destination.is_open_on(frame.line, query.date) {
            if let Some(segment) =
                Segment::new(network, frame.line, frame.station, query.destination)
            {
                state.segments.push(segment);
                state.record(frame.hops.saturating_add(segment.hops));
                state.segments.pop();
                return Ok(());
            }
        }

        for target in network.transfer_targets(frame.line, frame.station) {
            if target.station == frame.station || state.lines_used.contains(&target.line) {
                continue;
            }

            let interchange = network.station(target.station);
            if !interchange.is_open_on(frame.line, query.date)
                || !interchange.is_open_on(target.line, query.date)
            {
                continue;
            }

            let Some(segment) = Segment::new(network, frame.line, frame.station, target.station)
            else {
                continue;
            };
            let ride = timing::ride(network, self.model, &segment, frame.clock)?;
            if !self.is_running(target.line, ride.end, query.order_by)? {
                continue;
            }

            let change_cost = self.model.change_cost_at(ride.end);
            let next = Frame {
                hops: frame.hops.saturating_add(segment.hops),
                station: target.station,
                line: target.line,
                clock: ride.end + Duration::minutes(i64::from(change_cost)),
            };

            state.segments.push(segment);
            state.lines_used.push(target.line);
            let result = self.explore(query, next, state);
            state.lines_used.pop();
            state.segments.pop();
            result?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
