//! The rail network graph.
//!
//! Stations and lines are stored in flat vectors and referred to by index.
//! A [`Network`] is built once per snapshot through [`NetworkBuilder`] and
//! is read-only afterwards: line station order, per-line positions and the
//! interchange lists are all derived at build time.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::category::{LineCost, TimeCategory, TimeCostModel};
use super::{ConfigError, LineCode};

/// Index of a station in its network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(usize);

/// Index of a line in its network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(usize);

/// A station's membership of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationCode {
    /// The line this code belongs to.
    pub line: LineId,

    /// Per-line station code, e.g. "EW27".
    pub code: String,

    /// Position key on the line; lines are ordered by ascending sequence.
    pub sequence: u32,

    /// Date the station opened on this line.
    pub opened_at: NaiveDate,
}

impl StationCode {
    /// Returns true if this membership opened strictly before `date`.
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.opened_at < date
    }
}

/// A named station, possibly served by several lines.
#[derive(Debug, Clone)]
pub struct Station {
    name: String,
    codes: Vec<StationCode>,
    lines: Vec<LineId>,
}

impl Station {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Memberships, ordered by line.
    pub fn codes(&self) -> &[StationCode] {
        &self.codes
    }

    /// Lines serving this station, in network line order.
    pub fn lines(&self) -> &[LineId] {
        &self.lines
    }

    /// The membership record for `line`, if the station is on it.
    pub fn code_on(&self, line: LineId) -> Option<&StationCode> {
        self.codes.iter().find(|c| c.line == line)
    }

    /// A station with more than one code is an interchange.
    pub fn is_interchange(&self) -> bool {
        self.codes.len() > 1
    }

    /// Returns true if the station had opened on `line` before `date`.
    pub fn is_open_on(&self, line: LineId, date: NaiveDate) -> bool {
        self.code_on(line).is_some_and(|c| c.is_open_on(date))
    }

    /// Returns true if the station had opened on any line before `date`.
    pub fn is_opened(&self, date: NaiveDate) -> bool {
        self.codes.iter().any(|c| c.is_open_on(date))
    }
}

/// A line/station pair reachable by changing trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferTarget {
    pub line: LineId,
    pub station: StationId,
}

/// A line: an ordered sequence of stations plus its cost table.
#[derive(Debug, Clone)]
pub struct Line {
    code: LineCode,
    stations: Vec<StationId>,
    positions: HashMap<StationId, usize>,
    transfers: Vec<TransferTarget>,
    costs: HashMap<String, LineCost>,
}

impl Line {
    pub fn code(&self) -> LineCode {
        self.code
    }

    /// Stations in traversal order.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Zero-based position of `station` on this line.
    pub fn position(&self, station: StationId) -> Option<usize> {
        self.positions.get(&station).copied()
    }

    pub fn serves(&self, station: StationId) -> bool {
        self.positions.contains_key(&station)
    }

    /// Every line change available along this line, in station order.
    pub fn transfers(&self) -> &[TransferTarget] {
        &self.transfers
    }

    /// This line's cost record for `category`.
    pub fn cost(&self, category: &TimeCategory) -> Result<LineCost, ConfigError> {
        self.costs
            .get(category.name())
            .copied()
            .ok_or_else(|| ConfigError::MissingLineCost {
                line: self.code,
                category: category.name().to_string(),
            })
    }
}

/// Read-only graph of stations, lines and interchanges.
#[derive(Debug, Clone)]
pub struct Network {
    stations: Vec<Station>,
    lines: Vec<Line>,
    by_name: HashMap<String, StationId>,
    by_code: HashMap<LineCode, LineId>,
}

impl Network {
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.0]
    }

    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.0]
    }

    pub fn stations(&self) -> impl Iterator<Item = (StationId, &Station)> {
        self.stations.iter().enumerate().map(|(i, s)| (StationId(i), s))
    }

    pub fn lines(&self) -> impl Iterator<Item = (LineId, &Line)> {
        self.lines.iter().enumerate().map(|(i, l)| (LineId(i), l))
    }

    /// Find a station by name, ignoring case and surrounding whitespace.
    pub fn find_station(&self, name: &str) -> Option<StationId> {
        self.by_name.get(&name_key(name)).copied()
    }

    pub fn find_line(&self, code: LineCode) -> Option<LineId> {
        self.by_code.get(&code).copied()
    }

    /// Number of hops between two stations on a line, in either direction.
    ///
    /// Returns `None` if either station is not on the line.
    pub fn hop_distance(&self, line: LineId, from: StationId, to: StationId) -> Option<u32> {
        let line = self.line(line);
        let a = line.position(from)?;
        let b = line.position(to)?;
        Some(a.abs_diff(b) as u32)
    }

    /// Line changes reachable by riding `line` from `station`.
    ///
    /// A rider can alight at any interchange along the line, so this is the
    /// line's full interchange list; the boarding station only matters to
    /// the caller when computing the ride length.
    pub fn transfer_targets(&self, line: LineId, station: StationId) -> &[TransferTarget] {
        debug_assert!(self.line(line).serves(station));
        self.line(line).transfers()
    }

    /// Check that every line has a cost entry for every category.
    pub fn validate_costs(&self, model: &TimeCostModel) -> Result<(), ConfigError> {
        for line in &self.lines {
            for category in model.categories() {
                line.cost(category)?;
            }
        }
        Ok(())
    }
}

/// Incremental builder for a [`Network`].
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    lines: Vec<LineDraft>,
    stations: Vec<Station>,
    by_name: HashMap<String, StationId>,
    by_code: HashMap<LineCode, LineId>,
}

#[derive(Debug)]
struct LineDraft {
    code: LineCode,
    members: Vec<(u32, StationId)>,
    costs: HashMap<String, LineCost>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line. Line order is the order lines are added.
    pub fn add_line(&mut self, code: LineCode) -> Result<LineId, ConfigError> {
        if self.by_code.contains_key(&code) {
            return Err(ConfigError::DuplicateLine(code));
        }
        let id = LineId(self.lines.len());
        self.lines.push(LineDraft {
            code,
            members: Vec::new(),
            costs: HashMap::new(),
        });
        self.by_code.insert(code, id);
        Ok(id)
    }

    pub fn find_line(&self, code: LineCode) -> Option<LineId> {
        self.by_code.get(&code).copied()
    }

    /// Get or create the station called `name`.
    pub fn station(&mut self, name: &str) -> StationId {
        let key = name_key(name);
        if let Some(&id) = self.by_name.get(&key) {
            return id;
        }
        let id = StationId(self.stations.len());
        self.stations.push(Station {
            name: name.trim().to_string(),
            codes: Vec::new(),
            lines: Vec::new(),
        });
        self.by_name.insert(key, id);
        id
    }

    /// Place `station` on `line` at `sequence`.
    pub fn add_membership(
        &mut self,
        line: LineId,
        station: StationId,
        code: impl Into<String>,
        sequence: u32,
        opened_at: NaiveDate,
    ) -> Result<(), ConfigError> {
        let draft = &mut self.lines[line.0];
        if draft.members.iter().any(|&(_, s)| s == station) {
            return Err(ConfigError::DuplicateStation {
                line: draft.code,
                station: self.stations[station.0].name.clone(),
            });
        }
        if draft.members.iter().any(|&(seq, _)| seq == sequence) {
            return Err(ConfigError::DuplicateSequence {
                line: draft.code,
                sequence,
            });
        }
        draft.members.push((sequence, station));
        self.stations[station.0].codes.push(StationCode {
            line,
            code: code.into(),
            sequence,
            opened_at,
        });
        Ok(())
    }

    /// Set the cost of riding `line` during `category`.
    pub fn set_cost(&mut self, line: LineId, category: impl Into<String>, cost: LineCost) {
        self.lines[line.0].costs.insert(category.into(), cost);
    }

    /// Freeze the network, deriving station order and interchanges.
    pub fn build(self) -> Network {
        let NetworkBuilder {
            lines: drafts,
            mut stations,
            by_name,
            by_code,
        } = self;

        for station in &mut stations {
            station.codes.sort_by_key(|c| c.line);
        }

        let mut lines = Vec::with_capacity(drafts.len());
        for (index, mut draft) in drafts.into_iter().enumerate() {
            draft.members.sort_by_key(|&(seq, _)| seq);
            let order: Vec<StationId> = draft.members.iter().map(|&(_, s)| s).collect();
            let positions = order.iter().enumerate().map(|(i, &s)| (s, i)).collect();

            let id = LineId(index);
            for &station in &order {
                stations[station.0].lines.push(id);
            }

            let all_stations = &stations;
            let transfers = order
                .iter()
                .flat_map(|&station| {
                    all_stations[station.0]
                        .codes
                        .iter()
                        .filter(move |c| c.line != id)
                        .map(move |c| TransferTarget {
                            line: c.line,
                            station,
                        })
                })
                .collect();

            lines.push(Line {
                code: draft.code,
                stations: order,
                positions,
                transfers,
                costs: draft.costs,
            });
        }

        Network {
            stations,
            lines,
            by_name,
            by_code,
        }
    }
}

/// Lookup key for station names.
fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
