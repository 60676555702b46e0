use chrono::NaiveDate;
use itertools::Itertools;
use thiserror::Error;

use crate::graph::CityId;

/// Input validation errors, raised before any optimization work starts.
///
/// A zone without outgoing transitions is deliberately not an error: the
/// solver treats it as a forced zero-earning stay for the remaining hours.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("city {city} is not in the trips data, available cities: {}", available.iter().join(", "))]
    UnknownCity { city: CityId, available: Vec<CityId> },

    #[error("zone `{zone}` is not part of city {city}")]
    UnknownZone { city: CityId, zone: String },

    #[error("start hour {0} is not on the clock, expected 0..=23")]
    StartHour(u8),

    #[error("shift duration of {0} hours is out of range, expected 1..=24")]
    Duration(u32),

    #[error("a week starting {0} runs past the end of the calendar")]
    WeekStart(NaiveDate),

    #[error("parameter `{name}` has an invalid value of {value}")]
    Parameter { name: &'static str, value: f64 },
}
