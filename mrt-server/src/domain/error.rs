//! Domain error types.
//!
//! These errors describe a snapshot that cannot be searched: missing
//! cost tables, dangling references, malformed time data. They are
//! configuration faults, distinct from a user asking for a route that
//! does not exist.

use super::{InvalidLineCode, LineCode, TimeError};

/// Configuration errors in a network or time-cost snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The fallback time category is not defined
    #[error("time category {0:?} is required but not defined")]
    MissingFallbackCategory(String),

    /// A line has no cost entry for a time category
    #[error("line {line} has no cost entry for time category {category:?}")]
    MissingLineCost { line: LineCode, category: String },

    /// A time category name is defined twice
    #[error("time category {0:?} is defined more than once")]
    DuplicateCategory(String),

    /// A cost row refers to a category that does not exist
    #[error("unknown time category {0:?}")]
    UnknownCategory(String),

    /// A weekday index outside 0-6
    #[error("time category {category:?} has invalid weekday index {index}")]
    InvalidWeekday { category: String, index: u8 },

    /// A line is defined twice
    #[error("line {0} is defined more than once")]
    DuplicateLine(LineCode),

    /// A row refers to a line that does not exist
    #[error("unknown line {0}")]
    UnknownLine(String),

    /// A station appears twice on the same line
    #[error("station {station:?} appears more than once on line {line}")]
    DuplicateStation { line: LineCode, station: String },

    /// Two stations share a sequence number on the same line
    #[error("sequence {sequence} is used more than once on line {line}")]
    DuplicateSequence { line: LineCode, sequence: u32 },

    /// A line code failed validation
    #[error(transparent)]
    LineCode(#[from] InvalidLineCode),

    /// Time data failed validation
    #[error("{context}: {source}")]
    Time {
        context: String,
        #[source]
        source: TimeError,
    },
}
