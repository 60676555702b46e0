use std::time::Instant;

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::{
    core::{
        error::SolveError,
        params::Params,
        plan::WorkPlan,
        solver::{SolveRequest, Solver},
    },
    graph::{HourOfDay, Position, ZoneGraph},
    prelude::*,
};

/// A starting zone ranked by the earnings of its optimal plan.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedStart {
    /// Mean coordinates of the starting zone, for display.
    pub position: Position,

    pub plan: WorkPlan,
}

impl RankedStart {
    pub fn zone(&self) -> &str {
        &self.plan.start_zone
    }
}

/// Solve once per zone and rank the starts, the best earner first.
///
/// The solves only share the read-only graph, so they fan out across the
/// thread pool. Ties are broken towards the lower zone identifier.
#[instrument(skip_all, fields(n_zones = graph.n_zones()))]
pub fn best_starts(
    graph: &ZoneGraph,
    params: &Params,
    start_hour: HourOfDay,
    duration: u32,
    reference_date: NaiveDate,
    top_k: usize,
) -> Result<Vec<RankedStart>, SolveError> {
    let start_time = Instant::now();
    let solver = Solver::builder().graph(graph).params(params).build();
    let mut ranked: Vec<RankedStart> = graph
        .zones()
        .par_iter()
        .map(|zone| {
            let request = SolveRequest::builder()
                .start_zone(zone.id.as_str())
                .start_hour(start_hour)
                .duration(duration)
                .reference_date(reference_date)
                .build();
            let plan = solver.solve(&request)?;
            Ok(RankedStart { position: zone.position, plan })
        })
        .collect::<Result<_, SolveError>>()?;
    ranked.sort_unstable_by(|left, right| {
        right
            .plan
            .earnings
            .cmp(&left.plan.earnings)
            .then_with(|| left.plan.start_zone.cmp(&right.plan.start_zone))
    });
    ranked.truncate(top_k);
    info!(n_ranked = ranked.len(), elapsed = ?start_time.elapsed(), "ranked the starting zones");
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixtures::round_the_clock,
        graph::{CityId, GraphSet},
    };

    fn graphs() -> GraphSet {
        let mut records = round_the_clock(1, "c_1_0", "c_1_0", 2.0);
        records.extend(round_the_clock(1, "c_1_0", "c_1_1", 4.0));
        records.extend(round_the_clock(1, "c_1_1", "c_1_1", 20.0));
        records.extend(round_the_clock(1, "c_1_2", "c_1_0", 6.0));
        GraphSet::from_records(records)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()
    }

    #[test]
    fn ranking_is_sorted_by_earnings() {
        let graphs = graphs();
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        let ranked = best_starts(graph, &params, HourOfDay(8), 8, date(), 10).unwrap();

        assert_eq!(ranked.len(), graph.n_zones());
        for pair in ranked.windows(2) {
            assert!(pair[0].plan.earnings >= pair[1].plan.earnings);
        }

        // `c_1_0` hops into `c_1_1` in the first hour and earns the same as
        // starting there, so the tie goes to the lower identifier.
        assert_eq!(ranked[0].zone(), "c_1_0");
        assert_eq!(ranked[1].zone(), "c_1_1");
        assert_eq!(ranked[0].plan.earnings, ranked[1].plan.earnings);
        assert_eq!(ranked[2].zone(), "c_1_2");
        assert!(ranked[2].plan.earnings < ranked[1].plan.earnings);
    }

    #[test]
    fn ranking_is_capped_at_top_k() {
        let graphs = graphs();
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        let ranked = best_starts(graph, &params, HourOfDay(8), 8, date(), 2).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn ranking_does_not_depend_on_scheduling() {
        let graphs = graphs();
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        let first = best_starts(graph, &params, HourOfDay(8), 8, date(), 10).unwrap();
        let second = best_starts(graph, &params, HourOfDay(8), 8, date(), 10).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_duration_fails_every_zone() {
        let graphs = graphs();
        let graph = graphs.city(CityId(1)).unwrap();
        let params = Params::builder().build().unwrap();

        let result = best_starts(graph, &params, HourOfDay(8), 0, date(), 10);
        assert_eq!(result, Err(SolveError::Duration(0)));
    }
}
