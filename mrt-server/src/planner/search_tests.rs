//! Unit tests for the route search engine.

use super::*;
use crate::data::RailwaySnapshot;
use crate::domain::{
    LineCode, LineCost, NetworkBuilder, TimeCategory, TimeInterval, parse_timestamp,
};
use proptest::prelude::*;

fn bundled() -> RailwaySnapshot {
    let json = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/network.json"));
    RailwaySnapshot::from_json(json).unwrap()
}

fn run(
    snapshot: &RailwaySnapshot,
    from: &str,
    to: &str,
    time: &str,
    order_by: OrderBy,
) -> Result<SearchResult, SearchError> {
    let config = SearchConfig::default();
    let planner = Planner::new(&snapshot.network, &snapshot.costs, &config);
    planner.search(&SearchRequest::new(
        from,
        to,
        parse_timestamp(time).unwrap(),
        order_by,
    ))
}

fn codes(route: &SuggestRoute) -> String {
    route.station_codes().join(",")
}

/// Add a line opened in 2000. Station codes are the line code followed by
/// the 1-based position.
fn add_line(b: &mut NetworkBuilder, code: &str, stations: &[&str]) -> LineId {
    let opened = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let line = b.add_line(LineCode::parse(code).unwrap()).unwrap();
    for (i, name) in stations.iter().enumerate() {
        let station = b.station(name);
        let seq = i as u32 + 1;
        b.add_membership(line, station, format!("{code}{seq}"), seq, opened)
            .unwrap();
    }
    line
}

/// Build a network with a single "Non-Peak" category, a flat `change`
/// cost, and a per-line hop cost.
fn priced(lines: &[(&str, &[&str], u32)], change: u32) -> RailwaySnapshot {
    let mut b = NetworkBuilder::new();
    for &(code, stations, take) in lines {
        let line = add_line(&mut b, code, stations);
        b.set_cost(line, "Non-Peak", LineCost::new(take, true));
    }
    let costs =
        TimeCostModel::new(vec![TimeCategory::new("Non-Peak", vec![], vec![], change).unwrap()])
            .unwrap();
    RailwaySnapshot {
        network: b.build(),
        costs,
    }
}

/// Like [`priced`], with every hop costing `take` minutes.
fn synthetic(lines: &[(&str, &[&str])], take: u32, change: u32) -> RailwaySnapshot {
    let lines: Vec<_> = lines
        .iter()
        .map(|&(code, stations)| (code, stations, take))
        .collect();
    priced(&lines, change)
}

/// Build a network with a daily "Rush" category from 13:00 to 13:30 and a
/// "Non-Peak" fallback. Hop costs differ per line and per category, and
/// the second line does not run during Rush.
fn rush_hour(lines: &[(&str, &[&str])]) -> RailwaySnapshot {
    let mut b = NetworkBuilder::new();
    for (i, &(code, stations)) in lines.iter().enumerate() {
        let line = add_line(&mut b, code, stations);
        let i = i as u32;
        b.set_cost(line, "Rush", LineCost::new(7 - i, i != 1));
        b.set_cost(line, "Non-Peak", LineCost::new(2 + i, true));
    }
    let costs = TimeCostModel::new(vec![
        TimeCategory::new(
            "Rush",
            vec![0, 1, 2, 3, 4, 5, 6],
            vec![TimeInterval::parse("13:00-13:30").unwrap()],
            5,
        )
        .unwrap(),
        TimeCategory::new("Non-Peak", vec![], vec![], 2).unwrap(),
    ])
    .unwrap();
    RailwaySnapshot {
        network: b.build(),
        costs,
    }
}

const MIDDAY: &str = "2021-01-15 13:00";

// ---------------------------------------------------------------------------
// Bundled network
// ---------------------------------------------------------------------------

#[test]
fn distance_mode_prefers_fewest_stations() {
    let snapshot = bundled();
    let result = run(&snapshot, "Holland Village", "Bugis", MIDDAY, OrderBy::Distance).unwrap();

    assert_eq!(result.routes.len(), 1);
    assert_eq!(result.description(), "1 route(s) found");

    let route = &result.routes[0];
    assert_eq!(
        route.summary,
        "Travel from Holland Village to Bugis Stations travelled: 9 \
         Route: (CC21,CC20,CC19,DT9,DT10,DT11,DT12,DT13,DT14)"
    );
    assert_eq!(route.total_station, 7);
    assert_eq!(route.total_interchange, 1);
    assert_eq!(route.routes.len(), 2);
    assert_eq!(route.routes[0].line, "CC");
    assert_eq!(route.routes[0].direction, "Buona Vista->Botanic Gardens");
    assert_eq!(route.routes[1].line, "DT");
    assert_eq!(route.routes[1].direction, "Botanic Gardens->Bugis");
}

#[test]
fn time_mode_off_peak() {
    let snapshot = bundled();
    let result = run(&snapshot, "Holland Village", "Bugis", MIDDAY, OrderBy::Time).unwrap();

    assert_eq!(result.routes.len(), 1);
    let route = &result.routes[0];
    // 2 CC hops at 10, change 10, 5 DT hops at 8
    assert_eq!(route.total_cost, 70);
    assert_eq!(
        route.summary,
        "Travel from Holland Village to Bugis during non-peak Time: 70 minutes \
         Route: (CC21,CC20,CC19,DT9,DT10,DT11,DT12,DT13,DT14)"
    );
    assert_eq!(route.routes[0].time_cost, 20);
    assert_eq!(route.routes[1].time_cost, 40);
}

#[test]
fn time_mode_at_night_avoids_closed_line() {
    let snapshot = bundled();
    let result = run(
        &snapshot,
        "Holland Village",
        "Bugis",
        "2021-01-15 22:00",
        OrderBy::Time,
    )
    .unwrap();

    assert_eq!(result.routes.len(), 1);
    let route = &result.routes[0];
    assert_eq!(route.total_cost, 110);
    assert_eq!(
        codes(route),
        "CC21,CC22,EW21,EW20,EW19,EW18,EW17,EW16,EW15,EW14,EW13,EW12"
    );
    assert!(route.summary.contains("during night Time: 110 minutes"));
}

#[test]
fn distance_mode_ignores_operating_hours() {
    let snapshot = bundled();
    let result = run(
        &snapshot,
        "Holland Village",
        "Bugis",
        "2021-01-15 23:00",
        OrderBy::Distance,
    )
    .unwrap();

    assert_eq!(
        codes(&result.routes[0]),
        "CC21,CC20,CC19,DT9,DT10,DT11,DT12,DT13,DT14"
    );
}

#[test]
fn time_mode_morning_peak() {
    let snapshot = bundled();
    let result = run(
        &snapshot,
        "Boon Lay",
        "Little India",
        "2021-01-15 06:00",
        OrderBy::Time,
    )
    .unwrap();

    assert_eq!(result.routes.len(), 1);
    let route = &result.routes[0];
    assert_eq!(route.total_cost, 150);
    assert_eq!(route.total_interchange, 2);
    assert_eq!(
        codes(route),
        "EW27,EW26,EW25,EW24,EW23,EW22,EW21,CC22,CC21,CC20,CC19,DT9,DT10,DT11,DT12"
    );
    assert!(route.summary.starts_with("Travel from Boon Lay to Little India during peak"));
}

#[test]
fn time_mode_crossing_into_night() {
    // The CC/DT route would reach Botanic Gardens after DT closes at 22:00.
    let snapshot = bundled();
    let result = run(
        &snapshot,
        "Boon Lay",
        "Little India",
        "2021-01-15 20:40",
        OrderBy::Time,
    )
    .unwrap();

    assert_eq!(result.routes.len(), 1);
    let route = &result.routes[0];
    // 11 EW hops to 22:30, night change 10, 4 NE hops at night rate 10
    assert_eq!(route.total_cost, 160);
    assert_eq!(
        codes(route),
        "EW27,EW26,EW25,EW24,EW23,EW22,EW21,EW20,EW19,EW18,EW17,EW16,NE3,NE4,NE5,NE6,NE7"
    );
    assert!(route.summary.contains("during peak Time: 160 minutes"));
    assert_eq!(route.routes[1].direction, "HarbourFront->Little India");
}

#[test]
fn station_not_yet_opened() {
    let snapshot = bundled();
    let err = run(
        &snapshot,
        "Dhoby Ghaut",
        "Shenton Way",
        "2021-01-15 20:40",
        OrderBy::Time,
    )
    .unwrap_err();

    assert_eq!(err, SearchError::NotInOperation("Shenton Way".into()));
    assert_eq!(err.to_string(), "Shenton Way is not in operation or opened");
}

#[test]
fn station_with_no_running_line() {
    let snapshot = bundled();
    let err = run(
        &snapshot,
        "Bugis",
        "Changi Airport",
        "2021-01-15 23:40",
        OrderBy::Time,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Changi Airport is not in operation or opened");

    // The same trip is fine when hours are ignored
    let result = run(
        &snapshot,
        "Bugis",
        "Changi Airport",
        "2021-01-15 23:40",
        OrderBy::Distance,
    )
    .unwrap();
    assert_eq!(result.routes[0].total_station, 10);
}

#[test]
fn unopened_line_is_not_used_for_transfers() {
    // Outram Park is on TE, but TE opened after the query date
    let snapshot = bundled();
    let result = run(&snapshot, "Boon Lay", "Clarke Quay", MIDDAY, OrderBy::Distance).unwrap();

    for route in &result.routes {
        assert!(route.routes.iter().all(|leg| leg.line != "TE"));
    }
}

#[test]
fn unknown_station() {
    let snapshot = bundled();

    let err = run(&snapshot, "Yish", "Bugis", MIDDAY, OrderBy::Time).unwrap_err();
    assert_eq!(err.to_string(), "Yish  is not contain");

    let err = run(&snapshot, "Dhoby Ghaut", "Cash", MIDDAY, OrderBy::Time).unwrap_err();
    assert_eq!(err, SearchError::StationNotFound("Cash".into()));
    assert_eq!(err.to_string(), "Cash  is not contain");
}

#[test]
fn same_station() {
    let snapshot = bundled();
    let err = run(&snapshot, "bugis", "Bugis", MIDDAY, OrderBy::Distance).unwrap_err();
    assert_eq!(err.to_string(), "bugis and Bugis is the same station");
}

#[test]
fn station_names_are_case_insensitive() {
    let snapshot = bundled();
    let result = run(
        &snapshot,
        "  holland VILLAGE ",
        "bugis",
        MIDDAY,
        OrderBy::Time,
    )
    .unwrap();

    assert!(
        result.routes[0]
            .summary
            .starts_with("Travel from Holland Village to Bugis")
    );
}

#[test]
fn search_is_repeatable() {
    let snapshot = bundled();
    let first = run(&snapshot, "Boon Lay", "Little India", "2021-01-15 20:40", OrderBy::Time);
    let second = run(&snapshot, "Boon Lay", "Little India", "2021-01-15 20:40", OrderBy::Time);

    assert_eq!(first, second);
    assert!(first.unwrap().frames_explored > 0);
}

// ---------------------------------------------------------------------------
// Synthetic networks
// ---------------------------------------------------------------------------

#[test]
fn tied_routes_are_all_returned() {
    let snapshot = synthetic(
        &[
            ("AA", &["O", "P", "Q"]),
            ("BB", &["P", "R", "D"]),
            ("CC", &["Q", "D"]),
        ],
        5,
        3,
    );

    let result = run(&snapshot, "O", "D", MIDDAY, OrderBy::Distance).unwrap();
    assert_eq!(result.description(), "2 route(s) found");
    assert_eq!(codes(&result.routes[0]), "AA1,AA2,BB1,BB2,BB3");
    assert_eq!(codes(&result.routes[1]), "AA1,AA2,AA3,CC1,CC2");
    assert!(result.routes.iter().all(|r| r.total_station == 3));

    let result = run(&snapshot, "O", "D", MIDDAY, OrderBy::Time).unwrap();
    assert_eq!(result.routes.len(), 2);
    assert!(result.routes.iter().all(|r| r.total_cost == 18));
}

#[test]
fn time_mode_ranks_by_hops_not_minutes() {
    let snapshot = priced(
        &[
            ("AA", &["O", "X1", "X2", "D"], 10),
            ("BB", &["O", "Y1", "Y2", "Y3", "D"], 1),
        ],
        3,
    );

    let result = run(&snapshot, "O", "D", MIDDAY, OrderBy::Time).unwrap();
    assert_eq!(result.routes.len(), 1);
    let route = &result.routes[0];
    assert_eq!(codes(route), "AA1,AA2,AA3,AA4");
    assert_eq!(route.total_station, 3);
    // The slower line still wins; minutes are only reported
    assert_eq!(route.total_cost, 30);
}

#[test]
fn better_route_discards_earlier_ties() {
    let snapshot = synthetic(
        &[
            ("AA", &["O", "P", "Q", "S"]),
            ("BB", &["P", "X", "Y", "D"]),
            ("CC", &["Q", "Z", "D"]),
            ("DD", &["O", "D"]),
        ],
        5,
        3,
    );

    let result = run(&snapshot, "O", "D", MIDDAY, OrderBy::Distance).unwrap();
    assert_eq!(result.routes.len(), 1);
    assert_eq!(codes(&result.routes[0]), "DD1,DD2");
    assert_eq!(result.routes[0].total_interchange, 0);
}

#[test]
fn lines_are_not_reused() {
    let snapshot = synthetic(
        &[
            ("AA", &["O", "P", "Q"]),
            ("BB", &["P", "Q"]),
            ("CC", &["Q", "D"]),
        ],
        5,
        3,
    );

    let result = run(&snapshot, "O", "D", MIDDAY, OrderBy::Distance).unwrap();
    assert_eq!(result.routes.len(), 2);
    assert_eq!(codes(&result.routes[0]), "AA1,AA2,BB1,BB2,CC1,CC2");
    assert_eq!(codes(&result.routes[1]), "AA1,AA2,AA3,CC1,CC2");
    for route in &result.routes {
        let mut lines: Vec<_> = route.routes.iter().map(|leg| leg.line.as_str()).collect();
        let count = lines.len();
        lines.sort_unstable();
        lines.dedup();
        assert_eq!(lines.len(), count);
    }
}

#[test]
fn disconnected_network_has_no_route() {
    let snapshot = synthetic(&[("AA", &["O", "P"]), ("BB", &["Q", "D"])], 5, 3);

    let err = run(&snapshot, "O", "D", MIDDAY, OrderBy::Distance).unwrap_err();
    assert_eq!(err, SearchError::NoRoute);
    assert_eq!(err.to_string(), "Sorry, no route found !");
}

#[test]
fn bound_limits_reported_routes() {
    let snapshot = synthetic(&[("AA", &["O", "P", "Q", "D"])], 5, 3);
    let config = SearchConfig::new(2);
    let planner = Planner::new(&snapshot.network, &snapshot.costs, &config);
    let departure = parse_timestamp(MIDDAY).unwrap();

    let err = planner
        .search(&SearchRequest::new("O", "D", departure, OrderBy::Distance))
        .unwrap_err();
    assert_eq!(err, SearchError::NoRoute);

    let err = planner
        .search(&SearchRequest::new("O", "D", departure, OrderBy::Time))
        .unwrap_err();
    assert_eq!(err, SearchError::NoRoute);

    let result = planner
        .search(&SearchRequest::new("O", "P", departure, OrderBy::Time))
        .unwrap();
    assert_eq!(result.routes[0].total_cost, 5);
}

#[test]
fn transfer_onto_line_opening_later_is_skipped() {
    let opened = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let later = chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let mut b = NetworkBuilder::new();
    let aa = b.add_line(LineCode::parse("AA").unwrap()).unwrap();
    let bb = b.add_line(LineCode::parse("BB").unwrap()).unwrap();
    let cc = b.add_line(LineCode::parse("CC").unwrap()).unwrap();

    let o = b.station("O");
    let p = b.station("P");
    let q = b.station("Q");
    let d = b.station("D");
    b.add_membership(aa, o, "AA1", 1, opened).unwrap();
    b.add_membership(aa, p, "AA2", 2, opened).unwrap();
    b.add_membership(aa, q, "AA3", 3, opened).unwrap();
    b.add_membership(bb, p, "BB1", 1, later).unwrap();
    b.add_membership(bb, d, "BB2", 2, opened).unwrap();
    b.add_membership(cc, q, "CC1", 1, opened).unwrap();
    b.add_membership(cc, d, "CC2", 2, opened).unwrap();
    for line in [aa, bb, cc] {
        b.set_cost(line, "Non-Peak", LineCost::new(5, true));
    }
    let snapshot = RailwaySnapshot {
        network: b.build(),
        costs: TimeCostModel::new(vec![
            TimeCategory::new("Non-Peak", vec![], vec![], 3).unwrap(),
        ])
        .unwrap(),
    };

    let result = run(&snapshot, "O", "D", MIDDAY, OrderBy::Distance).unwrap();
    assert_eq!(result.routes.len(), 1);
    assert_eq!(codes(&result.routes[0]), "AA1,AA2,AA3,CC1,CC2");
}

#[test]
fn closed_line_is_not_boarded() {
    let opened = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let mut b = NetworkBuilder::new();
    let aa = b.add_line(LineCode::parse("AA").unwrap()).unwrap();
    let bb = b.add_line(LineCode::parse("BB").unwrap()).unwrap();
    let cc = b.add_line(LineCode::parse("CC").unwrap()).unwrap();
    let o = b.station("O");
    let p = b.station("P");
    let q = b.station("Q");
    let d = b.station("D");
    b.add_membership(aa, o, "AA1", 1, opened).unwrap();
    b.add_membership(aa, p, "AA2", 2, opened).unwrap();
    b.add_membership(aa, q, "AA3", 3, opened).unwrap();
    b.add_membership(bb, p, "BB1", 1, opened).unwrap();
    b.add_membership(bb, d, "BB2", 2, opened).unwrap();
    b.add_membership(cc, q, "CC1", 1, opened).unwrap();
    b.add_membership(cc, d, "CC2", 2, opened).unwrap();

    for line in [aa, cc] {
        b.set_cost(line, "Night", LineCost::new(10, true));
        b.set_cost(line, "Non-Peak", LineCost::new(10, true));
    }
    b.set_cost(bb, "Night", LineCost::new(1, false));
    b.set_cost(bb, "Non-Peak", LineCost::new(1, true));

    let snapshot = RailwaySnapshot {
        network: b.build(),
        costs: TimeCostModel::new(vec![
            TimeCategory::new(
                "Night",
                vec![0, 1, 2, 3, 4, 5, 6],
                vec![TimeInterval::parse("22:00-06:00").unwrap()],
                3,
            )
            .unwrap(),
            TimeCategory::new("Non-Peak", vec![], vec![], 3).unwrap(),
        ])
        .unwrap(),
    };

    // By day the two-hop BB shortcut wins: 10 + 3 + 1 minutes
    let result = run(&snapshot, "O", "D", MIDDAY, OrderBy::Time).unwrap();
    assert_eq!(result.routes.len(), 1);
    assert_eq!(codes(&result.routes[0]), "AA1,AA2,BB1,BB2");
    assert_eq!(result.routes[0].total_cost, 14);

    // At night BB does not run, leaving three hops: 20 + 3 + 10 minutes
    let result = run(&snapshot, "O", "D", "2021-01-15 23:00", OrderBy::Time).unwrap();
    assert_eq!(result.routes.len(), 1);
    assert_eq!(codes(&result.routes[0]), "AA1,AA2,AA3,CC1,CC2");
    assert_eq!(result.routes[0].total_cost, 33);
}

#[test]
fn record_keeps_ties_and_clears_on_improvement() {
    let mut state = SearchState::new(100);
    state.record(10);
    state.record(10);
    assert_eq!(state.best.len(), 2);

    state.record(12);
    assert_eq!(state.best.len(), 2);

    state.record(7);
    assert_eq!(state.best.len(), 1);
    assert_eq!(state.best_hops, 7);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

const POOL: [&str; 7] = ["S0", "S1", "S2", "S3", "S4", "S5", "S6"];
const LINE_CODES: [&str; 4] = ["AA", "BB", "CC", "DD"];

/// Every complete path in distance mode, without pruning.
fn all_totals(snapshot: &RailwaySnapshot, from: StationId, to: StationId) -> Vec<u32> {
    fn walk(
        net: &Network,
        line: LineId,
        at: StationId,
        to: StationId,
        cost: u32,
        used: &mut Vec<LineId>,
        totals: &mut Vec<u32>,
    ) {
        if let Some(hops) = net.hop_distance(line, at, to) {
            totals.push(cost + hops);
            return;
        }
        for target in net.transfer_targets(line, at) {
            if target.station == at || used.contains(&target.line) {
                continue;
            }
            let hops = net.hop_distance(line, at, target.station).unwrap();
            used.push(target.line);
            walk(net, target.line, target.station, to, cost + hops, used, totals);
            used.pop();
        }
    }

    let net = &snapshot.network;
    let mut totals = Vec::new();
    for &line in net.station(from).lines() {
        let mut used = vec![line];
        walk(net, line, from, to, 0, &mut used, &mut totals);
    }
    totals
}

/// Hops and minutes of every complete path in time mode, without pruning.
///
/// A frame is only entered while its line runs, and a transfer is only
/// taken onto a line running when the ride ends.
fn all_timed_totals(
    snapshot: &RailwaySnapshot,
    from: StationId,
    to: StationId,
    departure: NaiveDateTime,
) -> Vec<(u32, u32)> {
    struct Walk<'a> {
        net: &'a Network,
        costs: &'a TimeCostModel,
        to: StationId,
        used: Vec<LineId>,
        totals: Vec<(u32, u32)>,
    }

    impl Walk<'_> {
        fn running(&self, line: LineId, clock: NaiveDateTime) -> bool {
            let category = self.costs.category_at(clock);
            self.net.line(line).cost(category).unwrap().is_open
        }

        fn step(
            &mut self,
            line: LineId,
            at: StationId,
            clock: NaiveDateTime,
            hops: u32,
            minutes: u32,
        ) {
            if !self.running(line, clock) {
                return;
            }
            let (net, costs) = (self.net, self.costs);
            if let Some(segment) = Segment::new(net, line, at, self.to) {
                let ride = timing::ride(net, costs, &segment, clock).unwrap();
                self.totals.push((hops + segment.hops, minutes + ride.minutes));
                return;
            }
            for target in net.transfer_targets(line, at) {
                if target.station == at || self.used.contains(&target.line) {
                    continue;
                }
                let segment = Segment::new(net, line, at, target.station).unwrap();
                let ride = timing::ride(net, costs, &segment, clock).unwrap();
                if !self.running(target.line, ride.end) {
                    continue;
                }
                let change = costs.change_cost_at(ride.end);
                self.used.push(target.line);
                self.step(
                    target.line,
                    target.station,
                    ride.end + Duration::minutes(i64::from(change)),
                    hops + segment.hops,
                    minutes + ride.minutes + change,
                );
                self.used.pop();
            }
        }
    }

    let mut walk = Walk {
        net: &snapshot.network,
        costs: &snapshot.costs,
        to,
        used: Vec::new(),
        totals: Vec::new(),
    };
    for &line in snapshot.network.station(from).lines() {
        walk.used.push(line);
        walk.step(line, from, departure, 0, 0);
        walk.used.pop();
    }
    walk.totals
}

/// Whether any line serving `station` runs at `clock`.
fn served_at(snapshot: &RailwaySnapshot, station: StationId, clock: NaiveDateTime) -> bool {
    let category = snapshot.costs.category_at(clock);
    snapshot
        .network
        .station(station)
        .lines()
        .iter()
        .any(|&line| snapshot.network.line(line).cost(category).unwrap().is_open)
}

fn line_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(POOL.to_vec(), 2..=5).prop_shuffle()
}

proptest! {
    #[test]
    fn returns_exactly_the_cheapest_paths(
        lines in prop::collection::vec(line_strategy(), 1..=4),
        from in 0..POOL.len(),
        to in 0..POOL.len(),
    ) {
        prop_assume!(from != to);

        let layout: Vec<(&str, &[&str])> = LINE_CODES
            .iter()
            .zip(&lines)
            .map(|(code, stations)| (*code, stations.as_slice()))
            .collect();
        let snapshot = synthetic(&layout, 4, 2);
        let (from, to) = (POOL[from], POOL[to]);

        let result = run(&snapshot, from, to, MIDDAY, OrderBy::Distance);
        let (Some(origin), Some(destination)) = (
            snapshot.network.find_station(from),
            snapshot.network.find_station(to),
        ) else {
            prop_assert!(matches!(result, Err(SearchError::StationNotFound(_))));
            return Ok(());
        };

        let totals = all_totals(&snapshot, origin, destination);
        match totals.iter().min() {
            None => {
                prop_assert_eq!(result, Err(SearchError::NoRoute));
            }
            Some(&best) => {
                let result = result.unwrap();
                let expected = totals.iter().filter(|&&t| t == best).count();
                prop_assert_eq!(result.routes.len(), expected);
                for route in &result.routes {
                    prop_assert_eq!(route.total_station, best);

                    let mut used: Vec<_> = route.routes.iter().map(|leg| &leg.line).collect();
                    let count = used.len();
                    used.sort();
                    used.dedup();
                    prop_assert_eq!(used.len(), count);
                }
            }
        }
    }

    #[test]
    fn time_mode_returns_the_shortest_running_paths(
        lines in prop::collection::vec(line_strategy(), 2..=4),
        from in 0..POOL.len(),
        to in 0..POOL.len(),
        time in prop::sample::select(vec![
            "2021-01-15 12:40",
            "2021-01-15 13:00",
            "2021-01-15 13:20",
        ]),
    ) {
        prop_assume!(from != to);

        let layout: Vec<(&str, &[&str])> = LINE_CODES
            .iter()
            .zip(&lines)
            .map(|(code, stations)| (*code, stations.as_slice()))
            .collect();
        let snapshot = rush_hour(&layout);
        let (from, to) = (POOL[from], POOL[to]);
        let departure = parse_timestamp(time).unwrap();

        let result = run(&snapshot, from, to, time, OrderBy::Time);
        let (Some(origin), Some(destination)) = (
            snapshot.network.find_station(from),
            snapshot.network.find_station(to),
        ) else {
            prop_assert!(matches!(result, Err(SearchError::StationNotFound(_))));
            return Ok(());
        };
        if !served_at(&snapshot, origin, departure) {
            prop_assert_eq!(result, Err(SearchError::NotInOperation(from.to_string())));
            return Ok(());
        }
        if !served_at(&snapshot, destination, departure) {
            prop_assert_eq!(result, Err(SearchError::NotInOperation(to.to_string())));
            return Ok(());
        }

        let totals = all_timed_totals(&snapshot, origin, destination, departure);
        match totals.iter().map(|&(hops, _)| hops).min() {
            None => {
                prop_assert_eq!(result, Err(SearchError::NoRoute));
            }
            Some(best) => {
                let result = result.unwrap();
                let mut expected: Vec<u32> = totals
                    .iter()
                    .filter(|&&(hops, _)| hops == best)
                    .map(|&(_, minutes)| minutes)
                    .collect();
                let mut minutes: Vec<u32> =
                    result.routes.iter().map(|route| route.total_cost).collect();
                expected.sort_unstable();
                minutes.sort_unstable();
                prop_assert_eq!(minutes, expected);

                for route in &result.routes {
                    prop_assert_eq!(route.total_station, best);

                    let mut used: Vec<_> = route.routes.iter().map(|leg| &leg.line).collect();
                    let count = used.len();
                    used.sort();
                    used.dedup();
                    prop_assert_eq!(used.len(), count);
                }
            }
        }
    }

    #[test]
    fn search_is_deterministic(
        lines in prop::collection::vec(line_strategy(), 1..=4),
        from in 0..POOL.len(),
        to in 0..POOL.len(),
    ) {
        let layout: Vec<(&str, &[&str])> = LINE_CODES
            .iter()
            .zip(&lines)
            .map(|(code, stations)| (*code, stations.as_slice()))
            .collect();
        let snapshot = synthetic(&layout, 4, 2);

        let first = run(&snapshot, POOL[from], POOL[to], MIDDAY, OrderBy::Time);
        let second = run(&snapshot, POOL[from], POOL[to], MIDDAY, OrderBy::Time);
        prop_assert_eq!(first, second);
    }
}
