use clap::Parser;
use itertools::Itertools;

use crate::{
    analysis::zone_popularity,
    cli::{data::DataArgs, export::ExportArgs, model::ModelArgs},
    graph::HourOfDay,
    prelude::*,
    report::ActivityEntry,
    tables::build_activity_table,
};

#[derive(Parser)]
pub struct ZonesArgs {
    #[clap(flatten)]
    data: DataArgs,

    /// Hour of day to inspect, `0..=23`.
    #[clap(long = "hour", env = "START_HOUR", default_value = "8")]
    hour: HourOfDay,

    #[clap(flatten)]
    model: ModelArgs,

    #[clap(flatten)]
    export: ExportArgs,
}

impl ZonesArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let graphs = self.data.load()?;
        let graph = graphs.city(self.data.city)?;
        let params = self.model.to_params()?;
        let rows = zone_popularity(graph, &params, self.hour)?;

        println!("{}", build_activity_table(&rows));
        self.export.export(graph.city(), &rows.iter().map(ActivityEntry::from).collect_vec())?;
        Ok(())
    }
}
