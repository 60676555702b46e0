use bon::Builder;
use chrono::NaiveDate;

use crate::{
    core::{
        error::SolveError,
        params::Params,
        plan::{PlanStep, WorkPlan},
        transition::TransitionModel,
    },
    graph::{HourOfDay, ZoneGraph, ZoneIndex},
    prelude::*,
    quantity::{money::Money, rate::MoneyRate, time::Hours},
};

/// One starting configuration for the optimizer.
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct SolveRequest {
    #[builder(into)]
    pub start_zone: String,
    pub start_hour: HourOfDay,

    /// Shift length in hours, `1..=24`.
    pub duration: u32,

    /// Date the plan is reported for. The demand model is a fixed daily
    /// cycle, so the date never changes the outcome, only the report.
    pub reference_date: NaiveDate,
}

/// Finite-horizon optimizer over `(zone, elapsed hour)` states.
///
/// Works backwards from the end of the shift: the value of a state is the best
/// discounted earning of any candidate move plus the value of the successor
/// state one hour later. The argmax choices are kept and replayed forwards to
/// recover the plan itself.
#[derive(Builder)]
pub struct Solver<'a> {
    graph: &'a ZoneGraph,
    params: &'a Params,
}

impl Solver<'_> {
    #[instrument(skip_all)]
    pub fn solve(&self, request: &SolveRequest) -> Result<WorkPlan, SolveError> {
        let start = self.validate(request)?;
        let model = TransitionModel::new(self.graph, self.params);
        let horizon = request.duration as usize;
        let mut table = StateTable::new(self.graph.n_zones(), horizon);

        for elapsed in (0..horizon).rev() {
            let hour = request.start_hour.cycle_add(elapsed);
            let discount = self.params.gamma().powi(elapsed as i32);
            for zone in self.graph.indices() {
                let mut best: Option<(Money, Choice)> = None;
                for candidate in model.candidate_moves(zone, hour) {
                    let value = candidate.rate * Hours::ONE * discount
                        + table.value(elapsed + 1, candidate.to);
                    // Strict improvement keeps the earlier candidate on ties,
                    // and candidates come ordered by destination identifier.
                    if best.is_none_or(|(best_value, _)| value > best_value) {
                        best = Some((value, Choice { to: candidate.to, rate: candidate.rate }));
                    }
                }
                // No departures were ever observed here: the zone absorbs the
                // driver, who idles through the hour without earning.
                let (value, choice) = best.unwrap_or_else(|| {
                    (table.value(elapsed + 1, zone), Choice { to: zone, rate: MoneyRate::ZERO })
                });
                table.set(elapsed, zone, value, choice);
            }
        }

        Ok(self.reconstruct(request, start, &table))
    }

    fn validate(&self, request: &SolveRequest) -> Result<ZoneIndex, SolveError> {
        if request.start_hour.0 > 23 {
            return Err(SolveError::StartHour(request.start_hour.0));
        }
        if !(1..=24).contains(&request.duration) {
            return Err(SolveError::Duration(request.duration));
        }
        self.graph.resolve(&request.start_zone).ok_or_else(|| SolveError::UnknownZone {
            city: self.graph.city(),
            zone: request.start_zone.clone(),
        })
    }

    /// Replays the stored choices forwards from the starting state.
    fn reconstruct(
        &self,
        request: &SolveRequest,
        start: ZoneIndex,
        table: &StateTable,
    ) -> WorkPlan {
        let mut steps = Vec::with_capacity(request.duration as usize);
        let mut position = start;
        for elapsed in 0..request.duration as usize {
            let choice = table.choice(elapsed, position);
            let discount = self.params.gamma().powi(elapsed as i32);
            steps.push(PlanStep {
                hour: request.start_hour.cycle_add(elapsed),
                zone: self.graph.zone(choice.to).id.clone(),
                stayed: choice.to == position,
                rate: choice.rate,
                earning: choice.rate * Hours::ONE * discount,
            });
            position = choice.to;
        }
        WorkPlan {
            start_zone: request.start_zone.clone(),
            start_hour: request.start_hour,
            reference_date: request.reference_date,
            earnings: table.value(0, start),
            steps,
        }
    }
}

/// The argmax move out of a state, with its undiscounted rate for reporting.
#[derive(Copy, Clone)]
struct Choice {
    to: ZoneIndex,
    rate: MoneyRate,
}

/// Flattened `(elapsed hour, zone)` state matrix.
///
/// Values get one extra row for the end of the shift, where everything is
/// worth nothing.
struct StateTable {
    n_zones: usize,
    values: Vec<Money>,
    choices: Vec<Choice>,
}

impl StateTable {
    fn new(n_zones: usize, horizon: usize) -> Self {
        Self {
            n_zones,
            values: vec![Money::ZERO; (horizon + 1) * n_zones],
            choices: vec![Choice { to: ZoneIndex(0), rate: MoneyRate::ZERO }; horizon * n_zones],
        }
    }

    fn value(&self, elapsed: usize, zone: ZoneIndex) -> Money {
        self.values[elapsed * self.n_zones + zone.0]
    }

    fn choice(&self, elapsed: usize, zone: ZoneIndex) -> Choice {
        self.choices[elapsed * self.n_zones + zone.0]
    }

    fn set(&mut self, elapsed: usize, zone: ZoneIndex, value: Money, choice: Choice) {
        self.values[elapsed * self.n_zones + zone.0] = value;
        self.choices[elapsed * self.n_zones + zone.0] = choice;
    }
}
