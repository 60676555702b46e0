use clap::Parser;

use crate::graph::HourOfDay;

#[derive(Copy, Clone, Parser)]
pub struct ShiftArgs {
    /// Hour of day the shift starts at, `0..=23`.
    #[clap(long = "hour", env = "START_HOUR", default_value = "8")]
    pub hour: HourOfDay,

    /// Shift length in hours, `1..=24`.
    #[clap(long = "duration", env = "DURATION", default_value = "8")]
    pub duration: u32,
}
