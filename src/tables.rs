use average::Mean;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    analysis::{DayPlan, ZoneActivity},
    core::{plan::WorkPlan, search::RankedStart},
    quantity::{money::Money, rate::MoneyRate, time::Hours},
};

pub fn build_plan_table(plan: &WorkPlan) -> Table {
    let mean_rate: MoneyRate = {
        let estimate: Mean = plan.steps.iter().map(|step| step.rate.0).collect();
        if estimate.is_empty() { MoneyRate::ZERO } else { estimate.mean().into() }
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Hour", "Zone", "Move", "Rate", "Earning"]);
    for step in &plan.steps {
        table.add_row(vec![
            Cell::new(step.hour).add_attribute(Attribute::Dim),
            Cell::new(&step.zone),
            if step.stayed {
                Cell::new("stay").add_attribute(Attribute::Dim)
            } else {
                Cell::new("move").fg(Color::Cyan)
            },
            Cell::new(step.rate).set_alignment(CellAlignment::Right).fg(
                if step.rate >= mean_rate { Color::Green } else { Color::Red },
            ),
            Cell::new(step.earning).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_plan_summary(plan: &WorkPlan) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Start", "First hour", "Length", "Earnings", "Hourly rate"]);
    table.add_row(vec![
        Cell::new(&plan.start_zone),
        Cell::new(plan.start_hour).add_attribute(Attribute::Dim),
        Cell::new(Hours::from(plan.duration())).set_alignment(CellAlignment::Right),
        Cell::new(plan.earnings)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(plan.hourly_rate()).set_alignment(CellAlignment::Right),
    ]);
    table
}

pub fn build_starts_table(ranked: &[RankedStart]) -> Table {
    let mean_earnings: Money = {
        let estimate: Mean = ranked.iter().map(|start| start.plan.earnings.0).collect();
        if estimate.is_empty() { Money::ZERO } else { estimate.mean().into() }
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["#", "Zone", "Position", "Earnings", "Path"]);
    for (index, start) in ranked.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).add_attribute(Attribute::Dim),
            Cell::new(start.zone()),
            Cell::new(format!("{:.4}, {:.4}", start.position.lat, start.position.lon))
                .add_attribute(Attribute::Dim),
            Cell::new(start.plan.earnings).set_alignment(CellAlignment::Right).fg(
                if start.plan.earnings >= mean_earnings { Color::Green } else { Color::Red },
            ),
            Cell::new(start.plan.path_preview()).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_schedules_table(plans: &[WorkPlan]) -> Table {
    let mean_rate: MoneyRate = {
        let estimate: Mean = plans.iter().map(|plan| plan.hourly_rate().0).collect();
        if estimate.is_empty() { MoneyRate::ZERO } else { estimate.mean().into() }
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Start", "Length", "Earnings", "Hourly rate", "Path"]);
    for plan in plans {
        table.add_row(vec![
            Cell::new(plan.start_hour),
            Cell::new(Hours::from(plan.duration())).set_alignment(CellAlignment::Right),
            Cell::new(plan.earnings).set_alignment(CellAlignment::Right),
            Cell::new(plan.hourly_rate()).set_alignment(CellAlignment::Right).fg(
                if plan.hourly_rate() >= mean_rate { Color::Green } else { Color::Red },
            ),
            Cell::new(plan.path_preview()).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_weekly_table(days: &[DayPlan]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Date", "Day", "Earnings", "Hourly rate"]);
    for day in days {
        table.add_row(vec![
            Cell::new(day.date.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(day.weekday()),
            Cell::new(day.plan.earnings)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
            Cell::new(day.plan.hourly_rate()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_activity_table(rows: &[ZoneActivity]) -> Table {
    let mean_rate: MoneyRate = {
        let estimate: Mean = rows.iter().map(|row| row.rate.0).collect();
        if estimate.is_empty() { MoneyRate::ZERO } else { estimate.mean().into() }
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Zone", "Inbound", "Outbound", "Net flow", "Ride time", "Rate"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.zone),
            Cell::new(row.inbound_trips).set_alignment(CellAlignment::Right),
            Cell::new(row.outbound_trips).set_alignment(CellAlignment::Right),
            Cell::new(row.net_flow()).set_alignment(CellAlignment::Right).fg(
                if row.net_flow() > 0 {
                    Color::Green
                } else if row.net_flow() == 0 {
                    Color::DarkYellow
                } else {
                    Color::Red
                },
            ),
            row.mean_ride_time
                .map(Cell::new)
                .unwrap_or_else(|| Cell::new("n/a"))
                .set_alignment(CellAlignment::Right),
            Cell::new(row.rate).set_alignment(CellAlignment::Right).fg(
                if row.rate >= mean_rate { Color::Green } else { Color::Red },
            ),
        ]);
    }
    table
}
