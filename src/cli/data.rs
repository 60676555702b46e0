use std::path::PathBuf;

use clap::Parser;

use crate::{
    graph::{CityId, GraphSet},
    prelude::*,
};

#[derive(Parser)]
pub struct DataArgs {
    /// Path to the historical trips CSV.
    #[clap(long = "trips", env = "TRIPS_PATH")]
    trips: PathBuf,

    /// City to analyze.
    #[clap(long = "city", env = "CITY_ID")]
    pub city: CityId,
}

impl DataArgs {
    pub fn load(&self) -> Result<GraphSet> {
        GraphSet::load(&self.trips)
    }
}
