use clap::Parser;
use itertools::Itertools;

use crate::{
    analysis::{DEFAULT_SCHEDULES, compare_schedules},
    cli::{data::DataArgs, date::DateArgs, export::ExportArgs, model::ModelArgs},
    prelude::*,
    report::ScheduleEntry,
    tables::build_schedules_table,
};

#[derive(Parser)]
pub struct CompareArgs {
    #[clap(flatten)]
    data: DataArgs,

    /// Starting zone, the busiest zone of the city when omitted.
    #[clap(long = "zone")]
    zone: Option<String>,

    #[clap(flatten)]
    date: DateArgs,

    #[clap(flatten)]
    model: ModelArgs,

    #[clap(flatten)]
    export: ExportArgs,
}

impl CompareArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let graphs = self.data.load()?;
        let graph = graphs.city(self.data.city)?;
        let params = self.model.to_params()?;
        let start_zone = match self.zone {
            Some(zone) => zone,
            None => {
                let index = graph.busiest_zone().context("the city has no zones")?;
                let zone = graph.zone(index).id.clone();
                info!(%zone, "defaulted to the busiest starting zone");
                zone
            }
        };
        let plans = compare_schedules(
            graph,
            &params,
            &start_zone,
            self.date.reference_date(),
            &DEFAULT_SCHEDULES,
        )?;

        println!("{}", build_schedules_table(&plans));
        self.export.export(graph.city(), &plans.iter().map(ScheduleEntry::from).collect_vec())?;
        Ok(())
    }
}
