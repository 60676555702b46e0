//! Canned analyses on top of the optimizer: schedule comparison, weekly
//! outlook and per-zone activity.

use chrono::{Days, NaiveDate};
use itertools::Itertools;

use crate::{
    core::{
        error::SolveError,
        estimator::DemandEstimator,
        params::Params,
        plan::WorkPlan,
        solver::{SolveRequest, Solver},
    },
    graph::{HourOfDay, ZoneGraph, ZoneIndex},
    quantity::{rate::MoneyRate, time::Minutes},
};

/// Typical schedules worth comparing: different starts of an average shift,
/// then different lengths of an average start.
pub const DEFAULT_SCHEDULES: [(HourOfDay, u32); 10] = [
    (HourOfDay(6), 8),
    (HourOfDay(8), 8),
    (HourOfDay(10), 8),
    (HourOfDay(14), 8),
    (HourOfDay(18), 8),
    (HourOfDay(22), 8),
    (HourOfDay(8), 4),
    (HourOfDay(8), 6),
    (HourOfDay(8), 10),
    (HourOfDay(8), 12),
];

/// Optimizes every schedule from the same starting zone and ranks them by
/// hourly rate, the best one first.
pub fn compare_schedules(
    graph: &ZoneGraph,
    params: &Params,
    start_zone: &str,
    reference_date: NaiveDate,
    schedules: &[(HourOfDay, u32)],
) -> Result<Vec<WorkPlan>, SolveError> {
    let solver = Solver::builder().graph(graph).params(params).build();
    let mut plans = schedules
        .iter()
        .map(|&(start_hour, duration)| {
            let request = SolveRequest::builder()
                .start_zone(start_zone)
                .start_hour(start_hour)
                .duration(duration)
                .reference_date(reference_date)
                .build();
            solver.solve(&request)
        })
        .collect::<Result<Vec<WorkPlan>, SolveError>>()?;
    plans.sort_by(|left, right| {
        right
            .hourly_rate()
            .cmp(&left.hourly_rate())
            .then_with(|| left.start_hour.cmp(&right.start_hour))
            .then_with(|| left.duration().cmp(&right.duration()))
    });
    Ok(plans)
}

/// One day of a [`weekly_outlook`].
#[derive(Clone, Debug, PartialEq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub plan: WorkPlan,
}

impl DayPlan {
    /// Weekday name, `Monday` style.
    pub fn weekday(&self) -> String {
        self.date.format("%A").to_string()
    }
}

/// Plans the same shift for seven consecutive days starting at `week_start`.
///
/// The demand model is a fixed daily cycle, so the days only differ in their
/// labels until per-weekday estimation lands.
pub fn weekly_outlook(
    graph: &ZoneGraph,
    params: &Params,
    start_zone: &str,
    start_hour: HourOfDay,
    duration: u32,
    week_start: NaiveDate,
) -> Result<Vec<DayPlan>, SolveError> {
    let dates = (0..7)
        .map(|offset| {
            week_start
                .checked_add_days(Days::new(offset))
                .ok_or(SolveError::WeekStart(week_start))
        })
        .collect::<Result<Vec<NaiveDate>, SolveError>>()?;
    let solver = Solver::builder().graph(graph).params(params).build();
    dates
        .into_iter()
        .map(|date| {
            let request = SolveRequest::builder()
                .start_zone(start_zone)
                .start_hour(start_hour)
                .duration(duration)
                .reference_date(date)
                .build();
            Ok(DayPlan { date, plan: solver.solve(&request)? })
        })
        .collect()
}

/// Trip flows through one zone during one hour of day.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneActivity {
    pub zone: String,
    pub inbound_trips: u64,
    pub outbound_trips: u64,

    /// Trip-weighted mean ride time of the departures, absent without any.
    pub mean_ride_time: Option<Minutes>,

    pub rate: MoneyRate,
}

impl ZoneActivity {
    /// Positive when more trips leave than arrive.
    pub const fn net_flow(&self) -> i64 {
        self.outbound_trips as i64 - self.inbound_trips as i64
    }
}

/// Per-zone trip counts and earning rates for one hour of day, the busiest
/// origin first. Self-loops count on both sides.
pub fn zone_popularity(
    graph: &ZoneGraph,
    params: &Params,
    hour: HourOfDay,
) -> Result<Vec<ZoneActivity>, SolveError> {
    if hour.0 > 23 {
        return Err(SolveError::StartHour(hour.0));
    }
    let estimator = DemandEstimator::new(graph, params);
    let mut inbound = vec![0_u64; graph.n_zones()];
    for zone in graph.indices() {
        for transition in graph.outgoing(zone) {
            inbound[transition.to.0] += transition.stats.trips_on_hour(hour);
        }
    }
    let mut rows = graph
        .indices()
        .map(|index| ZoneActivity {
            zone: graph.zone(index).id.clone(),
            inbound_trips: inbound[index.0],
            outbound_trips: graph
                .outgoing(index)
                .iter()
                .map(|transition| transition.stats.trips_on_hour(hour))
                .sum(),
            mean_ride_time: mean_ride_time(graph, index, hour),
            rate: estimator.earning_rate(index, hour),
        })
        .collect_vec();
    rows.sort_by(|left, right| {
        right.outbound_trips.cmp(&left.outbound_trips).then_with(|| left.zone.cmp(&right.zone))
    });
    Ok(rows)
}

/// Trip-weighted mean ride time of the zone's departures at the hour.
fn mean_ride_time(graph: &ZoneGraph, zone: ZoneIndex, hour: HourOfDay) -> Option<Minutes> {
    let mut trips = 0_u64;
    let mut total = Minutes::ZERO;
    for transition in graph.outgoing(zone) {
        if let Some(stats) = transition.stats.on_hour(hour) {
            trips += stats.trips;
            total += stats.mean_travel_time * stats.trips as f64;
        }
    }
    (trips != 0).then(|| total / trips as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixtures::{round_the_clock, trip},
        graph::{CityId, GraphSet},
    };

    fn graphs() -> GraphSet {
        let mut records = round_the_clock(1, "c_1_0", "c_1_0", 2.0);
        records.extend(round_the_clock(1, "c_1_0", "c_1_1", 4.0));
        records.extend(round_the_clock(1, "c_1_1", "c_1_1", 20.0));
        GraphSet::from_records(records)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 16).unwrap()
    }

    #[test]
    fn schedules_are_ranked_by_hourly_rate() {
        let graphs = graphs();
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        let plans =
            compare_schedules(graph, &params, "c_1_0", date(), &DEFAULT_SCHEDULES).unwrap();

        assert_eq!(plans.len(), DEFAULT_SCHEDULES.len());
        for pair in plans.windows(2) {
            assert!(pair[0].hourly_rate() >= pair[1].hourly_rate());
        }
        // Discounting favors the shortest shift.
        assert_eq!(plans[0].duration(), 4);
    }

    #[test]
    fn weekly_outlook_spans_seven_consecutive_days() {
        let graphs = graphs();
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        let days =
            weekly_outlook(graph, &params, "c_1_0", HourOfDay(8), 8, date()).unwrap();

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weekday(), "Monday");
        assert_eq!(days[6].weekday(), "Sunday");
        for pair in days.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, chrono::TimeDelta::days(1));
            // A fixed daily cycle earns the same every day.
            assert_eq!(pair[0].plan.earnings, pair[1].plan.earnings);
        }
        assert_eq!(days[3].plan.reference_date, date() + Days::new(3));
    }

    #[test]
    fn weekly_outlook_rejects_the_calendar_edge() {
        let graphs = graphs();
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        assert_eq!(
            weekly_outlook(graph, &params, "c_1_0", HourOfDay(8), 8, NaiveDate::MAX),
            Err(SolveError::WeekStart(NaiveDate::MAX)),
        );
    }

    #[test]
    fn popularity_counts_both_flow_directions() {
        let graphs = GraphSet::from_records(vec![
            trip(1, "c_1_0", "c_1_1", 8, 10.0, 10.0),
            trip(1, "c_1_0", "c_1_1", 8, 12.0, 10.0),
            trip(1, "c_1_0", "c_1_0", 8, 6.0, 5.0),
            trip(1, "c_1_1", "c_1_0", 8, 8.0, 10.0),
            trip(1, "c_1_1", "c_1_0", 9, 8.0, 10.0),
        ]);
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        let rows = zone_popularity(graph, &params, HourOfDay(8)).unwrap();

        // Three departures beat one, so `c_1_0` leads.
        assert_eq!(rows[0].zone, "c_1_0");
        assert_eq!(rows[0].outbound_trips, 3);
        assert_eq!(rows[0].inbound_trips, 2);
        assert_eq!(rows[0].net_flow(), 1);
        // One 5-minute and two 10-minute departures.
        assert_eq!(rows[0].mean_ride_time, Some(Minutes(25.0 / 3.0)));

        assert_eq!(rows[1].zone, "c_1_1");
        assert_eq!(rows[1].outbound_trips, 1);
        assert_eq!(rows[1].inbound_trips, 2);
        assert_eq!(rows[1].net_flow(), -1);
        assert_eq!(rows[1].mean_ride_time, Some(Minutes(10.0)));
    }

    #[test]
    fn ride_time_is_absent_without_departures_on_the_hour() {
        let graphs = GraphSet::from_records(vec![trip(1, "c_1_0", "c_1_1", 8, 10.0, 10.0)]);
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        let rows = zone_popularity(graph, &params, HourOfDay(3)).unwrap();
        assert!(rows.iter().all(|row| row.mean_ride_time.is_none()));
    }

    #[test]
    fn popularity_breaks_count_ties_by_identifier() {
        let graphs = GraphSet::from_records(vec![
            trip(1, "c_1_1", "c_1_0", 8, 10.0, 10.0),
            trip(1, "c_1_0", "c_1_1", 8, 10.0, 10.0),
        ]);
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        let rows = zone_popularity(graph, &params, HourOfDay(8)).unwrap();
        assert_eq!(rows[0].zone, "c_1_0");
        assert_eq!(rows[1].zone, "c_1_1");
    }

    #[test]
    fn popularity_rejects_off_the_clock_hours() {
        let graphs = graphs();
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        assert_eq!(
            zone_popularity(graph, &params, HourOfDay(24)),
            Err(SolveError::StartHour(24)),
        );
    }
}
