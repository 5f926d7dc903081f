use chrono::NaiveDate;

use crate::utils::error::{MobilityError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
        MobilityError::InvalidDate {
            value: text.trim().to_string(),
        }
    })
}

/// Expands "start:end" into every calendar date from start to end,
/// inclusive, ascending. An end before the start is rejected rather than
/// silently producing an empty list.
pub fn expand(range: &str) -> Result<Vec<String>> {
    let (start_text, end_text) =
        range
            .split_once(':')
            .ok_or_else(|| MobilityError::InvalidDateRange {
                value: range.to_string(),
                reason: "expected \"YYYY-MM-DD:YYYY-MM-DD\"".to_string(),
            })?;
    let start = parse_date(start_text)?;
    let end = parse_date(end_text)?;
    if end < start {
        return Err(MobilityError::InvalidDateRange {
            value: range.to_string(),
            reason: "end date precedes start date".to_string(),
        });
    }

    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day.format(DATE_FORMAT).to_string());
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    Ok(days)
}

/// A CLI date argument: either a single date or a "start:end" range.
pub fn date_list(arg: &str) -> Result<Vec<String>> {
    if arg.contains(':') {
        expand(arg)
    } else {
        Ok(vec![parse_date(arg)?.format(DATE_FORMAT).to_string()])
    }
}
