use std::collections::{BTreeMap, HashMap};

use derive_more::AddAssign;

use crate::{
    graph::{
        CityId,
        HourlyStats,
        Position,
        Transition,
        TransitionStats,
        Zone,
        ZoneGraph,
        ZoneIndex,
    },
    quantity::{money::Money, time::Minutes},
    trips::TripRecord,
};

/// Fold trip records into per-city graphs.
///
/// All aggregation goes through commutative accumulators keyed in ordered maps,
/// so the result does not depend on the order of the input rows.
pub(super) fn build(records: impl IntoIterator<Item = TripRecord>) -> BTreeMap<CityId, ZoneGraph> {
    let mut cities: BTreeMap<CityId, CityAccumulator> = BTreeMap::new();
    for record in records {
        cities.entry(record.city_id).or_default().push(&record);
    }
    cities.into_iter().map(|(city, accumulator)| (city, accumulator.build(city))).collect()
}

/// Sums of one edge-hour bucket.
#[derive(Copy, Clone, AddAssign)]
struct TripAccumulator {
    trips: u64,
    travel_time: Minutes,
    fare: Money,
}

impl Default for TripAccumulator {
    fn default() -> Self {
        Self { trips: 0, travel_time: Minutes::ZERO, fare: Money::ZERO }
    }
}

impl TripAccumulator {
    fn sample(record: &TripRecord) -> Self {
        Self { trips: 1, travel_time: record.duration_mins, fare: record.fare_amount }
    }

    fn mean_travel_time(self) -> Option<Minutes> {
        (self.trips != 0).then(|| self.travel_time / self.trips as f64)
    }

    fn mean_fare(self) -> Option<Money> {
        (self.trips != 0).then(|| self.fare / self.trips as f64)
    }

    fn into_hourly_stats(self) -> Option<HourlyStats> {
        Some(HourlyStats {
            trips: self.trips,
            mean_travel_time: self.mean_travel_time()?,
            mean_fare: self.mean_fare()?,
        })
    }
}

/// Sums of coordinates of one zone, over both its pickup and dropoff roles.
#[derive(Copy, Clone, Default, AddAssign)]
struct PositionAccumulator {
    count: u64,
    lat: f64,
    lon: f64,
}

impl PositionAccumulator {
    const fn sample(lat: f64, lon: f64) -> Self {
        Self { count: 1, lat, lon }
    }

    fn mean(self) -> Option<Position> {
        (self.count != 0).then(|| Position {
            lat: self.lat / self.count as f64,
            lon: self.lon / self.count as f64,
        })
    }
}

struct EdgeAccumulator {
    overall: TripAccumulator,
    hourly: [TripAccumulator; 24],
}

impl Default for EdgeAccumulator {
    fn default() -> Self {
        Self { overall: TripAccumulator::default(), hourly: [TripAccumulator::default(); 24] }
    }
}

impl EdgeAccumulator {
    fn into_stats(self) -> TransitionStats {
        TransitionStats {
            trips: self.overall.trips,
            mean_travel_time: self.overall.mean_travel_time().unwrap_or(Minutes::ZERO),
            mean_fare: self.overall.mean_fare().unwrap_or(Money::ZERO),
            hourly: self.hourly.map(TripAccumulator::into_hourly_stats),
        }
    }
}

#[derive(Default)]
struct CityAccumulator {
    /// Keyed by `(pickup, dropoff)`, so iteration yields destination-sorted
    /// edges per origin.
    edges: BTreeMap<(String, String), EdgeAccumulator>,

    positions: BTreeMap<String, PositionAccumulator>,
}

impl CityAccumulator {
    fn push(&mut self, record: &TripRecord) {
        let sample = TripAccumulator::sample(record);
        let edge = self
            .edges
            .entry((record.pickup_cluster.clone(), record.dropoff_cluster.clone()))
            .or_default();
        edge.overall += sample;
        edge.hourly[record.start_hour().index()] += sample;

        *self.positions.entry(record.pickup_cluster.clone()).or_default() +=
            PositionAccumulator::sample(record.pickup_lat, record.pickup_lon);
        *self.positions.entry(record.dropoff_cluster.clone()).or_default() +=
            PositionAccumulator::sample(record.drop_lat, record.drop_lon);
    }

    fn build(self, city: CityId) -> ZoneGraph {
        let zones: Vec<Zone> = self
            .positions
            .into_iter()
            .map(|(id, accumulator)| Zone {
                id,
                position: accumulator.mean().unwrap_or_default(),
            })
            .collect();
        let index: HashMap<String, ZoneIndex> =
            zones.iter().enumerate().map(|(i, zone)| (zone.id.clone(), ZoneIndex(i))).collect();

        let mut outgoing = vec![Vec::new(); zones.len()];
        for ((from, to), accumulator) in self.edges {
            let from = index[&from];
            let to = index[&to];
            outgoing[from.0].push(Transition { to, stats: accumulator.into_stats() });
        }

        ZoneGraph { city, zones, index, outgoing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixtures::trip,
        graph::{GraphSet, HourOfDay},
    };

    #[test]
    fn row_order_does_not_change_the_graph() {
        let mut records = vec![
            trip(1, "c_1_0", "c_1_1", 8, 10.0, 12.0),
            trip(1, "c_1_1", "c_1_0", 9, 8.0, 10.0),
            trip(1, "c_1_0", "c_1_1", 8, 6.0, 14.0),
            trip(1, "c_1_0", "c_1_0", 17, 5.0, 6.0),
        ];
        let forward = GraphSet::from_records(records.clone());
        records.reverse();
        let backward = GraphSet::from_records(records);
        assert_eq!(forward, backward);
    }

    #[test]
    fn destinations_are_sorted_by_identifier() {
        let graphs = GraphSet::from_records(vec![
            trip(1, "c_1_0", "c_1_2", 8, 10.0, 12.0),
            trip(1, "c_1_0", "c_1_0", 8, 10.0, 12.0),
            trip(1, "c_1_0", "c_1_1", 8, 10.0, 12.0),
        ]);
        let graph = graphs.city(CityId(1)).unwrap();
        let start = graph.resolve("c_1_0").unwrap();
        let destinations: Vec<&str> = graph
            .outgoing(start)
            .iter()
            .map(|transition| graph.zone(transition.to).id.as_str())
            .collect();
        assert_eq!(destinations, ["c_1_0", "c_1_1", "c_1_2"]);
    }

    #[test]
    fn dropoff_only_zone_is_a_node_without_outgoing() {
        let graphs = GraphSet::from_records(vec![trip(1, "c_1_0", "c_1_9", 8, 10.0, 12.0)]);
        let graph = graphs.city(CityId(1)).unwrap();
        let sink = graph.resolve("c_1_9").unwrap();
        assert!(graph.outgoing(sink).is_empty());
        assert_eq!(graph.outbound_trips(sink), 0);
    }

    #[test]
    fn means_are_split_per_hour() {
        let graphs = GraphSet::from_records(vec![
            trip(1, "c_1_0", "c_1_1", 8, 10.0, 12.0),
            trip(1, "c_1_0", "c_1_1", 8, 6.0, 8.0),
            trip(1, "c_1_0", "c_1_1", 9, 20.0, 30.0),
        ]);
        let graph = graphs.city(CityId(1)).unwrap();
        let start = graph.resolve("c_1_0").unwrap();
        let stats = &graph.outgoing(start)[0].stats;

        assert_eq!(stats.trips, 3);
        assert_eq!(stats.mean_fare, Money(12.0));

        let eight = stats.on_hour(HourOfDay(8)).unwrap();
        assert_eq!(eight.trips, 2);
        assert_eq!(eight.mean_fare, Money(8.0));
        assert_eq!(eight.mean_travel_time, Minutes(10.0));

        assert_eq!(stats.trips_on_hour(HourOfDay(9)), 1);
        assert!(stats.on_hour(HourOfDay(10)).is_none());
    }

    #[test]
    fn positions_average_both_roles() {
        let mut pickup = trip(1, "c_1_0", "c_1_1", 8, 10.0, 12.0);
        pickup.pickup_lat = 52.0;
        pickup.pickup_lon = 4.0;
        let mut dropoff = trip(1, "c_1_1", "c_1_0", 9, 10.0, 12.0);
        dropoff.drop_lat = 54.0;
        dropoff.drop_lon = 6.0;

        let graphs = GraphSet::from_records(vec![pickup, dropoff]);
        let graph = graphs.city(CityId(1)).unwrap();
        let zone = graph.zone(graph.resolve("c_1_0").unwrap());
        assert_eq!(zone.position, Position { lat: 53.0, lon: 5.0 });
    }
}
