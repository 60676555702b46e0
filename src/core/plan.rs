use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    graph::HourOfDay,
    quantity::{money::Money, rate::MoneyRate, time::Hours},
};

/// One worked hour of a [`WorkPlan`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanStep {
    /// Hour of day the step is worked at.
    pub hour: HourOfDay,

    /// Zone occupied during the step.
    pub zone: String,

    /// Whether the driver stays in the previous zone instead of relocating.
    pub stayed: bool,

    /// Undiscounted earning-rate estimate for the zone and hour.
    pub rate: MoneyRate,

    /// Discounted earnings the step contributes to the plan total.
    pub earning: Money,
}

/// Earnings-maximizing shift: a starting zone plus one move per worked hour.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkPlan {
    pub start_zone: String,
    pub start_hour: HourOfDay,

    /// The demand model is a fixed daily cycle, so the date only labels reports.
    pub reference_date: NaiveDate,

    /// Total discounted earnings over the whole shift.
    pub earnings: Money,

    pub steps: Vec<PlanStep>,
}

impl WorkPlan {
    pub fn duration(&self) -> u32 {
        self.steps.len() as u32
    }

    pub fn hourly_rate(&self) -> MoneyRate {
        self.earnings / Hours(self.steps.len() as f64)
    }

    /// Zone sequence starting with the starting zone, one extra entry per hour.
    pub fn path(&self) -> Vec<&str> {
        std::iter::once(self.start_zone.as_str())
            .chain(self.steps.iter().map(|step| step.zone.as_str()))
            .collect()
    }

    /// First hops of the path, `a -> b -> c...` style.
    pub fn path_preview(&self) -> String {
        let path = self.path();
        let preview = path.iter().take(3).join(" -> ");
        if path.len() > 3 { format!("{preview}...") } else { preview }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_through(zones: &[&str]) -> WorkPlan {
        let (start_zone, steps) = zones.split_first().unwrap();
        WorkPlan {
            start_zone: (*start_zone).to_string(),
            start_hour: HourOfDay(8),
            reference_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            earnings: Money(18.0),
            steps: steps
                .iter()
                .enumerate()
                .map(|(offset, zone)| PlanStep {
                    hour: HourOfDay(8).cycle_add(offset),
                    zone: (*zone).to_string(),
                    stayed: false,
                    rate: MoneyRate(3.0),
                    earning: Money(3.0),
                })
                .collect(),
        }
    }

    #[test]
    fn path_starts_at_the_starting_zone() {
        let plan = plan_through(&["c_1_0", "c_1_1", "c_1_1"]);
        assert_eq!(plan.path(), ["c_1_0", "c_1_1", "c_1_1"]);
        assert_eq!(plan.duration(), 2);
    }

    #[test]
    fn long_previews_are_shortened() {
        let plan = plan_through(&["c_1_0", "c_1_1", "c_1_2", "c_1_3"]);
        assert_eq!(plan.path_preview(), "c_1_0 -> c_1_1 -> c_1_2...");
    }

    #[test]
    fn short_previews_are_complete() {
        let plan = plan_through(&["c_1_0", "c_1_1"]);
        assert_eq!(plan.path_preview(), "c_1_0 -> c_1_1");
    }

    #[test]
    fn hourly_rate_divides_by_the_shift_length() {
        let plan = plan_through(&["c_1_0", "c_1_1", "c_1_1"]);
        assert_eq!(plan.hourly_rate(), MoneyRate(9.0));
    }
}
