use clap::Parser;

use crate::{
    cli::{data::DataArgs, date::DateArgs, export::ExportArgs, model::ModelArgs, shift::ShiftArgs},
    core::search::best_starts,
    prelude::*,
    report,
    tables::build_starts_table,
};

#[derive(Parser)]
pub struct ScoutArgs {
    #[clap(flatten)]
    data: DataArgs,

    /// How many top starting zones to keep.
    #[clap(long = "top", env = "TOP_K", default_value = "5")]
    top: usize,

    #[clap(flatten)]
    shift: ShiftArgs,

    #[clap(flatten)]
    date: DateArgs,

    #[clap(flatten)]
    model: ModelArgs,

    #[clap(flatten)]
    export: ExportArgs,
}

impl ScoutArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let graphs = self.data.load()?;
        let graph = graphs.city(self.data.city)?;
        let params = self.model.to_params()?;
        let ranked = best_starts(
            graph,
            &params,
            self.shift.hour,
            self.shift.duration,
            self.date.reference_date(),
            self.top,
        )?;

        println!("{}", build_starts_table(&ranked));
        self.export.export(graph.city(), &report::ranked_starts(&ranked))?;
        Ok(())
    }
}
