use std::path::Path;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer};

use crate::{
    graph::{CityId, HourOfDay},
    prelude::*,
    quantity::{money::Money, time::Minutes},
};

/// One historical ride, as recorded in the trips CSV.
///
/// Unknown columns are ignored, so the reader copes with exports that carry
/// extra per-ride metadata.
#[derive(Clone, Debug, Deserialize)]
pub struct TripRecord {
    pub city_id: CityId,

    #[serde(deserialize_with = "deserialize_start_time")]
    pub start_time: NaiveDateTime,

    pub duration_mins: Minutes,
    pub fare_amount: Money,
    pub pickup_cluster: String,
    pub dropoff_cluster: String,
    pub pickup_lat: f64,
    pub pickup_lon: f64,
    pub drop_lat: f64,
    pub drop_lon: f64,
}

impl TripRecord {
    /// Hour of day the ride started, which is the hour the whole ride is attributed to.
    pub fn start_hour(&self) -> HourOfDay {
        HourOfDay::from_clock_hour(self.start_time.hour())
    }
}

/// Read all trip records from a CSV file.
#[instrument(skip_all)]
pub fn read_csv(path: &Path) -> Result<Vec<TripRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open the trips file `{}`", path.display()))?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<TripRecord>, csv::Error>>()
        .with_context(|| format!("failed to parse the trips file `{}`", path.display()))?;
    info!(n_records = records.len(), "read the trips file");
    Ok(records)
}

/// Timestamps come in both `2023-01-15 08:23:11` and `2023-01-15T08:23:11` flavors,
/// optionally with fractional seconds.
fn deserialize_start_time<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_separated_timestamps() -> Result {
        let csv = "\
city_id,start_time,duration_mins,fare_amount,pickup_cluster,dropoff_cluster,pickup_lat,pickup_lon,drop_lat,drop_lon
3,2023-01-15 08:23:11,12.5,9.8,c_3_2,c_3_4,52.37,4.89,52.35,4.91
";
        let record = csv::Reader::from_reader(csv.as_bytes())
            .deserialize::<TripRecord>()
            .next()
            .context("no record")??;
        assert_eq!(record.city_id, CityId(3));
        assert_eq!(record.start_hour(), HourOfDay(8));
        assert_eq!(record.fare_amount, Money(9.8));
        Ok(())
    }

    #[test]
    fn parses_t_separated_timestamps_and_ignores_extra_columns() -> Result {
        let csv = "\
ride_id,city_id,start_time,duration_mins,fare_amount,pickup_cluster,dropoff_cluster,pickup_lat,pickup_lon,drop_lat,drop_lon
r-1,1,2023-02-01T22:05:00,7.0,5.25,c_1_0,c_1_1,48.85,2.35,48.86,2.36
";
        let record = csv::Reader::from_reader(csv.as_bytes())
            .deserialize::<TripRecord>()
            .next()
            .context("no record")??;
        assert_eq!(record.start_hour(), HourOfDay(22));
        assert_eq!(record.dropoff_cluster, "c_1_1");
        Ok(())
    }
}
