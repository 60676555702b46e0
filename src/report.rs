//! JSON exports: a timestamped envelope around one serialized analysis.

use std::{fs, path::Path};

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use crate::{
    analysis::{DayPlan, ZoneActivity},
    core::{
        plan::{PlanStep, WorkPlan},
        search::RankedStart,
    },
    graph::{CityId, HourOfDay},
    prelude::*,
    quantity::{money::Money, rate::MoneyRate, time::Minutes},
};

#[derive(Serialize)]
pub struct Report<T> {
    pub city_id: CityId,
    pub generated_at: DateTime<Local>,
    pub analysis: T,
}

/// Pretty-prints the envelope into the file.
pub fn export<T: Serialize>(path: &Path, city_id: CityId, analysis: &T) -> Result {
    let report = Report { city_id, generated_at: Local::now(), analysis };
    let buffer = serde_json::to_vec_pretty(&report).context("failed to serialize the report")?;
    fs::write(path, buffer)
        .with_context(|| format!("failed to write the report to `{}`", path.display()))?;
    info!(path = %path.display(), "exported the report");
    Ok(())
}

/// Full optimizer output for one starting configuration.
#[derive(Serialize)]
pub struct PlanAnalysis {
    start_zone: String,
    start_hour: HourOfDay,
    duration: u32,
    reference_date: NaiveDate,
    total_earnings: Money,
    hourly_rate: MoneyRate,
    path: Vec<String>,
    steps: Vec<PlanStep>,
}

impl From<&WorkPlan> for PlanAnalysis {
    fn from(plan: &WorkPlan) -> Self {
        Self {
            start_zone: plan.start_zone.clone(),
            start_hour: plan.start_hour,
            duration: plan.duration(),
            reference_date: plan.reference_date,
            total_earnings: plan.earnings,
            hourly_rate: plan.hourly_rate(),
            path: plan.path().into_iter().map(str::to_string).collect(),
            steps: plan.steps.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct RankedStartEntry {
    rank: usize,
    zone: String,
    lat: f64,
    lon: f64,
    total_earnings: Money,
    path: Vec<String>,
}

pub fn ranked_starts(ranked: &[RankedStart]) -> Vec<RankedStartEntry> {
    ranked
        .iter()
        .enumerate()
        .map(|(index, start)| RankedStartEntry {
            rank: index + 1,
            zone: start.zone().to_string(),
            lat: start.position.lat,
            lon: start.position.lon,
            total_earnings: start.plan.earnings,
            path: start.plan.path().into_iter().map(str::to_string).collect(),
        })
        .collect()
}

#[derive(Serialize)]
pub struct ScheduleEntry {
    start_hour: HourOfDay,
    duration: u32,
    total_earnings: Money,
    hourly_rate: MoneyRate,
    path_preview: String,
}

impl From<&WorkPlan> for ScheduleEntry {
    fn from(plan: &WorkPlan) -> Self {
        Self {
            start_hour: plan.start_hour,
            duration: plan.duration(),
            total_earnings: plan.earnings,
            hourly_rate: plan.hourly_rate(),
            path_preview: plan.path_preview(),
        }
    }
}

#[derive(Serialize)]
pub struct WeeklyEntry {
    date: NaiveDate,
    day_of_week: String,
    total_earnings: Money,
    hourly_rate: MoneyRate,
}

impl From<&DayPlan> for WeeklyEntry {
    fn from(day: &DayPlan) -> Self {
        Self {
            date: day.date,
            day_of_week: day.weekday(),
            total_earnings: day.plan.earnings,
            hourly_rate: day.plan.hourly_rate(),
        }
    }
}

#[derive(Serialize)]
pub struct ActivityEntry {
    zone: String,
    inbound_trips: u64,
    outbound_trips: u64,
    net_flow: i64,
    mean_ride_mins: Option<Minutes>,
    earning_rate_per_hour: MoneyRate,
}

impl From<&ZoneActivity> for ActivityEntry {
    fn from(activity: &ZoneActivity) -> Self {
        Self {
            zone: activity.zone.clone(),
            inbound_trips: activity.inbound_trips,
            outbound_trips: activity.outbound_trips,
            net_flow: activity.net_flow(),
            mean_ride_mins: activity.mean_ride_time,
            earning_rate_per_hour: activity.rate,
        }
    }
}
