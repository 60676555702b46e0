use clap::Parser;
use itertools::Itertools;

use crate::{
    analysis::weekly_outlook,
    cli::{data::DataArgs, date::DateArgs, export::ExportArgs, model::ModelArgs, shift::ShiftArgs},
    prelude::*,
    report::WeeklyEntry,
    tables::build_weekly_table,
};

#[derive(Parser)]
pub struct WeekArgs {
    #[clap(flatten)]
    data: DataArgs,

    /// Starting zone identifier.
    #[clap(long = "zone")]
    zone: String,

    #[clap(flatten)]
    shift: ShiftArgs,

    // `--date` names the first day of the pictured week.
    #[clap(flatten)]
    date: DateArgs,

    #[clap(flatten)]
    model: ModelArgs,

    #[clap(flatten)]
    export: ExportArgs,
}

impl WeekArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let graphs = self.data.load()?;
        let graph = graphs.city(self.data.city)?;
        let params = self.model.to_params()?;
        let days = weekly_outlook(
            graph,
            &params,
            &self.zone,
            self.shift.hour,
            self.shift.duration,
            self.date.reference_date(),
        )?;

        println!("{}", build_weekly_table(&days));
        self.export.export(graph.city(), &days.iter().map(WeeklyEntry::from).collect_vec())?;
        Ok(())
    }
}
