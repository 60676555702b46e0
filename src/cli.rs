mod compare;
mod data;
mod date;
mod export;
mod model;
mod plan;
mod scout;
mod shift;
mod week;
mod zones;

use clap::{Parser, Subcommand};

use crate::cli::{
    compare::CompareArgs, plan::PlanArgs, scout::ScoutArgs, week::WeekArgs, zones::ZonesArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: plan the most profitable shift from a fixed starting zone.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),

    /// Rank the starting zones of a city by their optimal earnings.
    #[clap(name = "scout")]
    Scout(Box<ScoutArgs>),

    /// Compare typical work schedules for one starting zone.
    #[clap(name = "compare")]
    Compare(Box<CompareArgs>),

    /// Plan the same shift for each day of a week.
    #[clap(name = "week")]
    Week(Box<WeekArgs>),

    /// Show per-zone trip activity during one hour of day.
    #[clap(name = "zones")]
    Zones(Box<ZonesArgs>),
}
