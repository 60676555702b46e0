use chrono::{Local, NaiveDate};
use clap::Parser;

#[derive(Copy, Clone, Parser)]
pub struct DateArgs {
    /// Date the report is generated for, today when omitted.
    #[clap(long = "date", env = "REFERENCE_DATE")]
    date: Option<NaiveDate>,
}

impl DateArgs {
    pub fn reference_date(self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}
