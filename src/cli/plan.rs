use clap::Parser;

use crate::{
    cli::{data::DataArgs, date::DateArgs, export::ExportArgs, model::ModelArgs, shift::ShiftArgs},
    core::solver::{SolveRequest, Solver},
    prelude::*,
    report::PlanAnalysis,
    tables::{build_plan_summary, build_plan_table},
};

#[derive(Parser)]
pub struct PlanArgs {
    #[clap(flatten)]
    data: DataArgs,

    /// Starting zone identifier, `c_3_17` style.
    #[clap(long = "zone")]
    zone: String,

    #[clap(flatten)]
    shift: ShiftArgs,

    #[clap(flatten)]
    date: DateArgs,

    #[clap(flatten)]
    model: ModelArgs,

    #[clap(flatten)]
    export: ExportArgs,
}

impl PlanArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let graphs = self.data.load()?;
        let graph = graphs.city(self.data.city)?;
        let params = self.model.to_params()?;
        let request = SolveRequest::builder()
            .start_zone(self.zone)
            .start_hour(self.shift.hour)
            .duration(self.shift.duration)
            .reference_date(self.date.reference_date())
            .build();
        let plan = Solver::builder().graph(graph).params(&params).build().solve(&request)?;
        info!(earnings = %plan.earnings, rate = %plan.hourly_rate(), "optimized the shift");

        println!("{}", build_plan_table(&plan));
        println!("{}", build_plan_summary(&plan));
        self.export.export(graph.city(), &PlanAnalysis::from(&plan))?;
        Ok(())
    }
}
