use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::{graph::CityId, prelude::*, report};

#[derive(Parser)]
pub struct ExportArgs {
    /// Export the analysis into a JSON file.
    #[clap(long = "json")]
    json: Option<PathBuf>,
}

impl ExportArgs {
    pub fn export<T: Serialize>(&self, city_id: CityId, analysis: &T) -> Result {
        match &self.json {
            Some(path) => report::export(path, city_id, analysis),
            None => Ok(()),
        }
    }
}
