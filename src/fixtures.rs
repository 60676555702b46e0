//! Hand-rolled trip records for the unit tests.

use chrono::NaiveDate;

use crate::{
    graph::CityId,
    quantity::{money::Money, time::Minutes},
    trips::TripRecord,
};

pub fn trip(city: u32, from: &str, to: &str, hour: u32, fare: f64, minutes: f64) -> TripRecord {
    TripRecord {
        city_id: CityId(city),
        start_time: NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_opt(hour, 23, 11)
            .unwrap(),
        duration_mins: Minutes(minutes),
        fare_amount: Money(fare),
        pickup_cluster: from.to_owned(),
        dropoff_cluster: to.to_owned(),
        pickup_lat: 52.37,
        pickup_lon: 4.89,
        drop_lat: 52.35,
        drop_lon: 4.91,
    }
}

/// A trip on every hour of the day, so the edge has no absent hourly slots.
pub fn round_the_clock(city: u32, from: &str, to: &str, fare: f64) -> Vec<TripRecord> {
    (0..24).map(|hour| trip(city, from, to, hour, fare, 10.0)).collect()
}
