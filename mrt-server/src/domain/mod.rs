//! Domain types for the route planner.
//!
//! This module contains the validated value types and the read-only
//! network and time-cost model that a search runs against. All types
//! enforce their invariants at construction time.

mod category;
mod error;
mod line_code;
mod network;
mod time;

pub use category::{FALLBACK_CATEGORY, LineCost, TimeCategory, TimeCostModel};
pub use error::ConfigError;
pub use line_code::{InvalidLineCode, LineCode};
pub use network::{
    Line, LineId, Network, NetworkBuilder, Station, StationCode, StationId, TransferTarget,
};
pub use time::{
    DATE_FORMAT, TIMESTAMP_FORMAT, TimeError, TimeInterval, TimeOfDay, parse_date,
    parse_timestamp, weekday_index,
};
