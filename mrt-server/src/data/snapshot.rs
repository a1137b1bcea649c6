//! Loading a network snapshot from JSON tables.
//!
//! The file mirrors the relational layout the data is maintained in:
//! lines, stations, line memberships, time categories and per-line costs.
//! Every reference is resolved and validated here, so a snapshot that
//! loads is one the planner can search without configuration errors.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::domain::{
    ConfigError, LineCode, LineCost, LineId, Network, NetworkBuilder, TimeCategory,
    TimeCostModel, TimeInterval, parse_date,
};

/// Errors that can occur while loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading the file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid snapshot JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The tables are inconsistent
    #[error("invalid snapshot: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    lines: Vec<LineRow>,
    #[serde(default)]
    stations: Vec<StationRow>,
    memberships: Vec<MembershipRow>,
    time_categories: Vec<CategoryRow>,
    line_costs: Vec<CostRow>,
}

#[derive(Debug, Deserialize)]
struct LineRow {
    code: String,
}

#[derive(Debug, Deserialize)]
struct StationRow {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MembershipRow {
    line: String,
    station: String,
    code: String,
    sequence: u32,
    opened_at: String,
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    name: String,
    #[serde(default)]
    weekdays: Vec<u8>,
    #[serde(default)]
    intervals: Vec<String>,
    change_cost: u32,
}

#[derive(Debug, Deserialize)]
struct CostRow {
    line: String,
    category: String,
    take_cost: u32,
    is_open: bool,
}

/// An immutable network plus the time-cost model to search it with.
#[derive(Debug)]
pub struct RailwaySnapshot {
    pub network: Network,
    pub costs: TimeCostModel,
}

impl RailwaySnapshot {
    /// Parse and validate a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        Ok(Self::from_tables(file)?)
    }

    /// Read a snapshot file.
    pub async fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let snapshot = Self::from_json(&json)?;

        info!(
            path = %path.display(),
            lines = snapshot.network.lines().count(),
            stations = snapshot.network.stations().count(),
            categories = snapshot.costs.categories().len(),
            "Loaded network snapshot"
        );
        Ok(snapshot)
    }

    fn from_tables(file: SnapshotFile) -> Result<Self, ConfigError> {
        let categories = file
            .time_categories
            .into_iter()
            .map(build_category)
            .collect::<Result<Vec<_>, _>>()?;
        let costs = TimeCostModel::new(categories)?;

        let mut builder = NetworkBuilder::new();
        for row in &file.lines {
            builder.add_line(LineCode::parse(&row.code)?)?;
        }
        for row in &file.stations {
            builder.station(&row.name);
        }

        for row in file.memberships {
            let line = resolve_line(&builder, &row.line)?;
            let station = builder.station(&row.station);
            let opened_at = parse_date(&row.opened_at).map_err(|source| ConfigError::Time {
                context: format!("opening date of {}", row.code),
                source,
            })?;
            builder.add_membership(line, station, row.code, row.sequence, opened_at)?;
        }

        for row in file.line_costs {
            let line = resolve_line(&builder, &row.line)?;
            if costs.get(&row.category).is_none() {
                return Err(ConfigError::UnknownCategory(row.category));
            }
            builder.set_cost(line, row.category, LineCost::new(row.take_cost, row.is_open));
        }

        let network = builder.build();
        network.validate_costs(&costs)?;

        Ok(Self { network, costs })
    }
}

fn build_category(row: CategoryRow) -> Result<TimeCategory, ConfigError> {
    let intervals = row
        .intervals
        .iter()
        .map(|s| {
            TimeInterval::parse(s).map_err(|source| ConfigError::Time {
                context: format!("interval {s:?} of category {:?}", row.name),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    TimeCategory::new(row.name, row.weekdays, intervals, row.change_cost)
}

fn resolve_line(builder: &NetworkBuilder, code: &str) -> Result<LineId, ConfigError> {
    LineCode::parse_normalized(code)
        .ok()
        .and_then(|c| builder.find_line(c))
        .ok_or_else(|| ConfigError::UnknownLine(code.to_string()))
}
