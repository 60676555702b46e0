mod builder;

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    core::error::SolveError,
    prelude::*,
    quantity::{money::Money, time::Minutes},
    trips::{self, TripRecord},
};

/// City identifier from the trips data.
#[derive(
    Copy,
    Clone,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub struct CityId(pub u32);

impl std::fmt::Debug for CityId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "city {}", self.0)
    }
}

/// Positional index of a zone within its [`ZoneGraph`].
///
/// Zones are sorted by identifier, so index order is identifier order.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ZoneIndex(pub usize);

/// Hour of day on a fixed daily cycle.
#[derive(Copy, Clone, Eq, Hash, Ord, PartialEq, PartialOrd, derive_more::FromStr)]
pub struct HourOfDay(pub u8);

impl HourOfDay {
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Clock hours coming from `chrono` are guaranteed to be in `0..24`.
    pub const fn from_clock_hour(hour: u32) -> Self {
        Self((hour % 24) as u8)
    }

    /// The hour of day after the given number of elapsed hours, wrapping around midnight.
    pub const fn cycle_add(self, elapsed_hours: usize) -> Self {
        Self(((self.0 as usize + elapsed_hours) % 24) as u8)
    }
}

impl std::fmt::Display for HourOfDay {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:02}:00", self.0)
    }
}

impl std::fmt::Debug for HourOfDay {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, formatter)
    }
}

/// Exported as clock time, `"08:00"` style.
impl Serialize for HourOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Mean pickup/dropoff coordinates, for display only.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub id: String,
    pub position: Position,
}

/// Statistics of trips observed on one edge during one hour of day.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HourlyStats {
    pub trips: u64,
    pub mean_travel_time: Minutes,
    pub mean_fare: Money,
}

/// Aggregate and per-hour statistics of one directed edge.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionStats {
    pub trips: u64,
    pub mean_travel_time: Minutes,
    pub mean_fare: Money,

    /// Per-hour breakdown, [`None`] where no trips were observed for the hour.
    pub hourly: [Option<HourlyStats>; 24],
}

impl TransitionStats {
    pub fn on_hour(&self, hour: HourOfDay) -> Option<HourlyStats> {
        self.hourly[hour.index()]
    }

    pub fn trips_on_hour(&self, hour: HourOfDay) -> u64 {
        self.on_hour(hour).map_or(0, |stats| stats.trips)
    }
}

/// Directed edge towards [`Transition::to`], self-loops included.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub to: ZoneIndex,
    pub stats: TransitionStats,
}

/// Immutable per-city zone graph.
///
/// Every zone that ever appears as a dropoff is a node, even when it has no
/// outgoing edges. Such a zone is a valid terminal state for the solver.
#[derive(Debug, PartialEq)]
pub struct ZoneGraph {
    city: CityId,

    /// Sorted by identifier.
    zones: Vec<Zone>,

    index: HashMap<String, ZoneIndex>,

    /// Outgoing transitions per zone, sorted by destination identifier.
    outgoing: Vec<Vec<Transition>>,
}

impl ZoneGraph {
    pub const fn city(&self) -> CityId {
        self.city
    }

    pub fn n_zones(&self) -> usize {
        self.zones.len()
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, index: ZoneIndex) -> &Zone {
        &self.zones[index.0]
    }

    pub fn indices(&self) -> impl Iterator<Item = ZoneIndex> {
        (0..self.zones.len()).map(ZoneIndex)
    }

    pub fn resolve(&self, zone_id: &str) -> Option<ZoneIndex> {
        self.index.get(zone_id).copied()
    }

    pub fn outgoing(&self, index: ZoneIndex) -> &[Transition] {
        &self.outgoing[index.0]
    }

    /// Total observed trips departing the zone, all hours.
    pub fn outbound_trips(&self, index: ZoneIndex) -> u64 {
        self.outgoing(index).iter().map(|transition| transition.stats.trips).sum()
    }

    /// The zone with the most outbound trips, the lowest identifier on ties.
    pub fn busiest_zone(&self) -> Option<ZoneIndex> {
        let mut best: Option<(u64, ZoneIndex)> = None;
        for index in self.indices() {
            let trips = self.outbound_trips(index);
            if best.is_none_or(|(best_trips, _)| trips > best_trips) {
                best = Some((trips, index));
            }
        }
        best.map(|(_, index)| index)
    }
}

/// All per-city graphs built from one trips file.
#[derive(Debug, PartialEq)]
pub struct GraphSet {
    cities: BTreeMap<CityId, ZoneGraph>,
}

impl GraphSet {
    #[instrument(skip_all)]
    pub fn load(path: &Path) -> Result<Self> {
        let records = trips::read_csv(path)?;
        let graphs = Self::from_records(records);
        info!(n_cities = graphs.cities.len(), "built the zone graphs");
        Ok(graphs)
    }

    pub fn from_records(records: impl IntoIterator<Item = TripRecord>) -> Self {
        Self { cities: builder::build(records) }
    }

    pub fn city(&self, city: CityId) -> Result<&ZoneGraph, SolveError> {
        self.cities.get(&city).ok_or_else(|| SolveError::UnknownCity {
            city,
            available: self.cities.keys().copied().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::trip;

    #[test]
    fn hour_of_day_wraps_around_midnight() {
        assert_eq!(HourOfDay(22).cycle_add(3), HourOfDay(1));
        assert_eq!(HourOfDay(8).cycle_add(0), HourOfDay(8));
    }

    #[test]
    fn hour_of_day_displays_as_clock_time() {
        assert_eq!(HourOfDay(6).to_string(), "06:00");
        assert_eq!(HourOfDay(14).to_string(), "14:00");
    }

    #[test]
    fn cities_are_isolated() {
        let graphs = GraphSet::from_records(vec![
            trip(1, "c_1_0", "c_1_1", 8, 10.0, 10.0),
            trip(2, "c_2_0", "c_2_0", 9, 7.0, 5.0),
        ]);

        let first = graphs.city(CityId(1)).unwrap();
        assert_eq!(first.n_zones(), 2);
        assert!(first.resolve("c_2_0").is_none());

        assert_eq!(graphs.city(CityId(2)).unwrap().n_zones(), 1);
        assert_eq!(
            graphs.city(CityId(9)).unwrap_err(),
            SolveError::UnknownCity { city: CityId(9), available: vec![CityId(1), CityId(2)] },
        );
    }
}
