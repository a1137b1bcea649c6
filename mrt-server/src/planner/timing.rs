//! Segment and itinerary timing.
//!
//! Costs are charged hop by hop: each hop looks up the time category at
//! the clock instant it starts, so a ride that crosses from peak into
//! night is charged peak rates for the early hops and night rates for the
//! late ones. The interchange cost after a ride uses the category at the
//! arrival instant.

use chrono::{Duration, NaiveDateTime};

use crate::domain::{ConfigError, LineId, Network, StationId, TimeCostModel};

/// A ride on one line between two of its stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub line: LineId,
    pub from: StationId,
    pub to: StationId,

    /// Stations passed, counting the arrival but not the departure.
    pub hops: u32,
}

impl Segment {
    /// Build a segment, or `None` if either station is not on `line`.
    pub fn new(network: &Network, line: LineId, from: StationId, to: StationId) -> Option<Self> {
        let hops = network.hop_distance(line, from, to)?;
        Some(Self {
            line,
            from,
            to,
            hops,
        })
    }
}

/// When a segment is ridden and what it costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentTiming {
    pub minutes: u32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Timings for a whole itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryTiming {
    /// One entry per segment.
    pub segments: Vec<SegmentTiming>,

    /// One entry per interchange, i.e. per segment except the last.
    pub interchange_costs: Vec<u32>,
}

impl ItineraryTiming {
    /// Riding plus interchange minutes.
    pub fn total_minutes(&self) -> u32 {
        self.segments.iter().map(|s| s.minutes).sum::<u32>()
            + self.interchange_costs.iter().sum::<u32>()
    }
}

/// Time a single ride starting at `start`.
pub fn ride(
    network: &Network,
    model: &TimeCostModel,
    segment: &Segment,
    start: NaiveDateTime,
) -> Result<SegmentTiming, ConfigError> {
    let line = network.line(segment.line);
    let mut clock = start;
    let mut minutes = 0;

    for _ in 0..segment.hops {
        let take_cost = line.cost(model.category_at(clock))?.take_cost;
        minutes += take_cost;
        clock += Duration::minutes(i64::from(take_cost));
    }

    Ok(SegmentTiming {
        minutes,
        start,
        end: clock,
    })
}

/// Walk an itinerary forward from `start`, timing every ride and
/// interchange.
///
/// No interchange cost follows the final segment.
pub fn walk(
    network: &Network,
    model: &TimeCostModel,
    segments: &[Segment],
    start: NaiveDateTime,
) -> Result<ItineraryTiming, ConfigError> {
    let mut clock = start;
    let mut timings = Vec::with_capacity(segments.len());
    let mut interchange_costs = Vec::with_capacity(segments.len().saturating_sub(1));

    for (idx, segment) in segments.iter().enumerate() {
        let timing = ride(network, model, segment, clock)?;
        clock = timing.end;
        timings.push(timing);

        if idx + 1 < segments.len() {
            let change_cost = model.change_cost_at(clock);
            interchange_costs.push(change_cost);
            clock += Duration::minutes(i64::from(change_cost));
        }
    }

    Ok(ItineraryTiming {
        segments: timings,
        interchange_costs,
    })
}
