//! Time categories and the time-cost model.
//!
//! A time category (peak, non-peak, night, ...) classifies a clock instant
//! by weekday and time of day. Each line carries a cost record per
//! category; the category itself carries the interchange cost.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use super::time::{TimeInterval, TimeOfDay, weekday_index};
use super::ConfigError;

/// Name of the category used when no interval matches.
pub const FALLBACK_CATEGORY: &str = "Non-Peak";

/// Per-line cost record for one time category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCost {
    /// Minutes per hop between adjacent stations.
    pub take_cost: u32,

    /// Whether the line runs during this category.
    pub is_open: bool,
}

impl LineCost {
    pub fn new(take_cost: u32, is_open: bool) -> Self {
        Self { take_cost, is_open }
    }
}

/// A named time-of-day category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeCategory {
    name: String,
    weekdays: Vec<u8>,
    intervals: Vec<TimeInterval>,
    change_cost: u32,
}

impl TimeCategory {
    /// Create a category.
    ///
    /// Weekday indices run from Monday = 0 to Sunday = 6.
    pub fn new(
        name: impl Into<String>,
        weekdays: Vec<u8>,
        intervals: Vec<TimeInterval>,
        change_cost: u32,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if let Some(&index) = weekdays.iter().find(|&&d| d > 6) {
            return Err(ConfigError::InvalidWeekday {
                category: name,
                index,
            });
        }
        Ok(Self {
            name,
            weekdays,
            intervals,
            change_cost,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weekdays(&self) -> &[u8] {
        &self.weekdays
    }

    pub fn intervals(&self) -> &[TimeInterval] {
        &self.intervals
    }

    /// Minutes charged for changing lines during this category.
    pub fn change_cost(&self) -> u32 {
        self.change_cost
    }

    /// Returns true if the instant's weekday is listed and its time of day
    /// falls in one of the intervals.
    pub fn matches(&self, instant: NaiveDateTime) -> bool {
        if !self.weekdays.contains(&weekday_index(instant)) {
            return false;
        }
        let t = TimeOfDay::of(instant);
        self.intervals.iter().any(|interval| interval.contains(t))
    }
}

/// The ordered set of time categories for a snapshot.
///
/// Resolution walks categories in definition order and returns the first
/// match, falling back to the category named [`FALLBACK_CATEGORY`].
#[derive(Debug, Clone)]
pub struct TimeCostModel {
    categories: Vec<TimeCategory>,
    fallback: usize,
}

impl TimeCostModel {
    /// Build the model, checking that names are unique and that the
    /// fallback category exists.
    pub fn new(categories: Vec<TimeCategory>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.name()) {
                return Err(ConfigError::DuplicateCategory(category.name().to_string()));
            }
        }

        let fallback = categories
            .iter()
            .position(|c| c.name() == FALLBACK_CATEGORY)
            .ok_or_else(|| ConfigError::MissingFallbackCategory(FALLBACK_CATEGORY.to_string()))?;

        Ok(Self {
            categories,
            fallback,
        })
    }

    /// Categories in resolution order.
    pub fn categories(&self) -> &[TimeCategory] {
        &self.categories
    }

    /// Look up a category by name.
    pub fn get(&self, name: &str) -> Option<&TimeCategory> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Resolve the category in effect at `instant`.
    pub fn category_at(&self, instant: NaiveDateTime) -> &TimeCategory {
        self.categories
            .iter()
            .find(|c| c.matches(instant))
            .unwrap_or(&self.categories[self.fallback])
    }

    /// Interchange cost in effect at `instant`.
    pub fn change_cost_at(&self, instant: NaiveDateTime) -> u32 {
        self.category_at(instant).change_cost()
    }
}
