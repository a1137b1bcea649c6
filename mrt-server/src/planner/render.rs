//! Turning raw segment lists into itineraries.

use chrono::NaiveDateTime;

use crate::domain::{ConfigError, LineId, Network, StationId, TimeCostModel};

use super::search::OrderBy;
use super::timing::{self, Segment};

/// A station passed on a leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStop {
    /// Station code on the leg's line, e.g. "DT12".
    pub code: String,
    pub name: String,
}

/// One leg of an itinerary: a ride on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLeg {
    /// Line code
    pub line: String,

    /// Terminus-to-terminus label for the direction of travel,
    /// e.g. "Pasir Ris->Tuas Link"
    pub direction: String,

    pub from_station: String,
    pub to_station: String,

    /// Riding minutes, excluding the interchange that follows
    pub time_cost: u32,

    /// Stations from boarding to alighting, inclusive
    pub take_stations: Vec<StationStop>,
}

/// A complete suggested route from origin to destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestRoute {
    /// Human-readable one-line description
    pub summary: String,

    /// All stations across all legs; interchange stations appear once per
    /// line they are passed on
    pub take_stations: Vec<StationStop>,

    /// Sum of hops over all legs
    pub total_station: u32,

    /// Riding plus interchange minutes
    pub total_cost: u32,

    pub total_interchange: u32,

    pub routes: Vec<RouteLeg>,
}

impl SuggestRoute {
    /// Station codes in travel order.
    pub fn station_codes(&self) -> Vec<&str> {
        self.take_stations.iter().map(|s| s.code.as_str()).collect()
    }
}

/// Renders segment lists found by a search.
pub struct Renderer<'a> {
    network: &'a Network,
    model: &'a TimeCostModel,
    order_by: OrderBy,
    departure: NaiveDateTime,
}

impl<'a> Renderer<'a> {
    pub fn new(
        network: &'a Network,
        model: &'a TimeCostModel,
        order_by: OrderBy,
        departure: NaiveDateTime,
    ) -> Self {
        Self {
            network,
            model,
            order_by,
            departure,
        }
    }

    /// Render one itinerary, re-timing it from the departure instant.
    pub fn render(&self, segments: &[Segment]) -> Result<SuggestRoute, ConfigError> {
        let timing = timing::walk(self.network, self.model, segments, self.departure)?;

        let mut route = SuggestRoute {
            summary: String::new(),
            take_stations: Vec::new(),
            total_station: 0,
            total_cost: 0,
            total_interchange: timing.interchange_costs.len() as u32,
            routes: Vec::with_capacity(segments.len()),
        };

        for (idx, (segment, seg_timing)) in segments.iter().zip(&timing.segments).enumerate() {
            let leg = self.leg(segment, seg_timing.minutes);

            route.take_stations.extend(leg.take_stations.iter().cloned());
            route.total_station += segment.hops;
            route.total_cost += seg_timing.minutes;
            if let Some(change_cost) = timing.interchange_costs.get(idx) {
                route.total_cost += change_cost;
            }
            route.routes.push(leg);
        }

        route.summary = self.summary(&route);
        Ok(route)
    }

    fn leg(&self, segment: &Segment, minutes: u32) -> RouteLeg {
        let line = self.network.line(segment.line);
        let stations = line.stations();
        let from = line.position(segment.from).unwrap_or_default();
        let to = line.position(segment.to).unwrap_or_default();

        let first = self.station_name(stations.first());
        let last = self.station_name(stations.last());

        let (direction, passed): (String, Vec<StationId>) = if from < to {
            (format!("{first}->{last}"), stations[from..=to].to_vec())
        } else {
            (
                format!("{last}->{first}"),
                stations[to..=from].iter().rev().copied().collect(),
            )
        };

        RouteLeg {
            line: line.code().to_string(),
            direction,
            from_station: self.network.station(segment.from).name().to_string(),
            to_station: self.network.station(segment.to).name().to_string(),
            time_cost: minutes,
            take_stations: passed
                .into_iter()
                .map(|s| self.stop(segment.line, s))
                .collect(),
        }
    }

    fn stop(&self, line: LineId, station: StationId) -> StationStop {
        let station = self.network.station(station);
        StationStop {
            code: station
                .code_on(line)
                .map(|c| c.code.clone())
                .unwrap_or_default(),
            name: station.name().to_string(),
        }
    }

    fn station_name(&self, station: Option<&StationId>) -> &str {
        station.map_or("", |&s| self.network.station(s).name())
    }

    fn summary(&self, route: &SuggestRoute) -> String {
        let from = route.take_stations.first().map_or("", |s| s.name.as_str());
        let to = route.take_stations.last().map_or("", |s| s.name.as_str());
        let codes = route.station_codes().join(",");

        match self.order_by {
            OrderBy::Time => {
                let category = self.model.category_at(self.departure).name().to_lowercase();
                format!(
                    "Travel from {from} to {to} during {category} Time: {} minutes Route: ({codes})",
                    route.total_cost
                )
            }
            OrderBy::Distance => format!(
                "Travel from {from} to {to} Stations travelled: {} Route: ({codes})",
                route.take_stations.len()
            ),
        }
    }
}
