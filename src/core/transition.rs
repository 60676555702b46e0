use crate::{
    core::{estimator::DemandEstimator, params::Params},
    graph::{HourOfDay, ZoneGraph, ZoneIndex},
    quantity::rate::MoneyRate,
};

/// One legal move out of a zone for one hour of work.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub to: ZoneIndex,

    /// Estimated earning rate at the destination during the hour of the move.
    pub rate: MoneyRate,
}

/// Enumerates candidate moves, the observed self-loop included.
#[derive(Copy, Clone)]
pub struct TransitionModel<'a> {
    graph: &'a ZoneGraph,
    estimator: DemandEstimator<'a>,
}

impl<'a> TransitionModel<'a> {
    pub const fn new(graph: &'a ZoneGraph, params: &'a Params) -> Self {
        Self { graph, estimator: DemandEstimator::new(graph, params) }
    }

    /// Moves out of the zone at the hour, ordered by destination identifier.
    ///
    /// An empty sequence means the zone has no observed departures: it absorbs
    /// the driver, who stays put and earns nothing for the remaining hours.
    pub fn candidate_moves(
        self,
        zone: ZoneIndex,
        hour: HourOfDay,
    ) -> impl Iterator<Item = Candidate> + 'a {
        self.graph.outgoing(zone).iter().map(move |transition| Candidate {
            to: transition.to,
            rate: self.estimator.earning_rate(transition.to, hour),
        })
    }
}
