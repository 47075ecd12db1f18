use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};

/// The single accepted wire format for class dates.
pub const CLASS_DATE_FORMAT: &str = "%Y-%m-%d";

/// Strictly parses a `YYYY-MM-DD` argument. Any valid calendar date is
/// accepted, past or future; no range checks are applied.
pub fn parse_class_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    if input.is_empty() {
        return Err(anyhow!("Missing date argument"));
    }

    NaiveDate::parse_from_str(input, CLASS_DATE_FORMAT)
        .map_err(|_| anyhow!("Invalid date '{}', expected YYYY-MM-DD", input))
}

pub fn format_class_date(date: NaiveDate) -> String {
    date.format(CLASS_DATE_FORMAT).to_string()
}

/// The current calendar date in the host's local timezone. Deployments in
/// different regions will observe different dates around midnight.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
