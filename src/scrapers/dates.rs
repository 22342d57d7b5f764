use crate::error::{Result, ScrapeError};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\D+(\d+)\D+(\d+)").expect("valid date pattern"))
}

/// First three numeric groups separated by non-digits, in encounter order
pub fn date_groups(input: &str) -> Result<[u32; 3]> {
    let invalid = || ScrapeError::DateFormat {
        input: input.to_string(),
    };
    let caps = date_pattern().captures(input).ok_or_else(invalid)?;

    let mut groups = [0u32; 3];
    for (slot, idx) in groups.iter_mut().zip(1usize..=3) {
        *slot = caps[idx].parse().map_err(|_| invalid())?;
    }
    Ok(groups)
}

/// Four-digit years only, so the formatted date is always `YYYY/MM/DD`
const YEARS: std::ops::RangeInclusive<u32> = 1..=9999;

/// Reads a year-month-day date written with any separators
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let [year, month, day] = date_groups(input)?;
    Some(year)
        .filter(|year| YEARS.contains(year))
        .and_then(|year| i32::try_from(year).ok())
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| ScrapeError::DateFormat {
            input: input.to_string(),
        })
}

/// `YYYY/MM/DD`, the format the hotel listing expects
pub fn normalize_date(input: &str) -> Result<String> {
    Ok(parse_date(input)?.format("%Y/%m/%d").to_string())
}
