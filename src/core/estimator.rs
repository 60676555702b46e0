use crate::{
    core::params::Params,
    graph::{HourOfDay, Transition, ZoneGraph, ZoneIndex},
    quantity::{money::Money, rate::MoneyRate},
};

/// Expected earning rate of being positioned in a zone at an hour of day.
#[derive(Copy, Clone)]
pub struct DemandEstimator<'a> {
    graph: &'a ZoneGraph,
    params: &'a Params,
}

impl<'a> DemandEstimator<'a> {
    pub const fn new(graph: &'a ZoneGraph, params: &'a Params) -> Self {
        Self { graph, params }
    }

    /// Laplace smoothing over the 24-hour cycle turns sparse per-hour trip counts
    /// into a probability mass, which is then scaled by the best available fare
    /// proxy and clamped to the demand floor.
    ///
    /// The returned rate is always finite and never below the floor. A zone with
    /// zero observations at every hour yields exactly the floor, whatever `epsilon`.
    pub fn earning_rate(&self, zone: ZoneIndex, hour: HourOfDay) -> MoneyRate {
        let outgoing = self.graph.outgoing(zone);
        let observed_at_hour: u64 =
            outgoing.iter().map(|transition| transition.stats.trips_on_hour(hour)).sum();
        let total_observed: u64 =
            outgoing.iter().map(|transition| transition.stats.trips).sum();

        let epsilon = self.params.epsilon();
        let denominator = total_observed as f64 + epsilon * 24.0;
        // With `epsilon = 0` and no observations at all the mass is zero, not `0 / 0`.
        let mass = if denominator > 0.0 {
            (observed_at_hour as f64 + epsilon) / denominator
        } else {
            0.0
        };

        let fare = fare_on_hour(outgoing, hour)
            .or_else(|| fare_overall(outgoing))
            .unwrap_or(Money::ZERO);

        let rate = MoneyRate(mass * fare.0);
        if rate.0.is_finite() {
            rate.max(self.params.lambda_floor())
        } else {
            self.params.lambda_floor()
        }
    }
}

/// Trip-weighted mean fare over the transitions observed at the hour.
fn fare_on_hour(outgoing: &[Transition], hour: HourOfDay) -> Option<Money> {
    let mut trips = 0_u64;
    let mut revenue = Money::ZERO;
    for transition in outgoing {
        if let Some(stats) = transition.stats.on_hour(hour) {
            trips += stats.trips;
            revenue += stats.mean_fare * stats.trips as f64;
        }
    }
    (trips != 0).then(|| revenue / trips as f64)
}

/// Trip-weighted mean fare over all transitions, all hours.
fn fare_overall(outgoing: &[Transition]) -> Option<Money> {
    let mut trips = 0_u64;
    let mut revenue = Money::ZERO;
    for transition in outgoing {
        trips += transition.stats.trips;
        revenue += transition.stats.mean_fare * transition.stats.trips as f64;
    }
    (trips != 0).then(|| revenue / trips as f64)
}
