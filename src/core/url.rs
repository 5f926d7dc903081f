use chrono::{Local, NaiveDate, TimeZone};

use crate::core::dates;
use crate::domain::model::{App, Direction};
use crate::utils::error::{MobilityError, Result};

/// Builds the fully-parameterized request URL for one (mode, city, date).
///
/// The callback token embeds the Unix timestamp of `date` at local
/// midnight with a literal `000` suffix, which is the request shape the
/// service expects. Deterministic given its inputs.
pub fn build_url(
    endpoint: &str,
    app: App,
    code: u32,
    direction: Direction,
    date: &str,
) -> Result<String> {
    let day = dates::parse_date(date)?;
    let timestamp = local_midnight_timestamp(day)?;
    let compact = day.format("%Y%m%d");

    let (path, type_param, date_param) = match app {
        App::Intercity => (
            "cityrank.jsonp",
            format!("&type=move_{direction}"),
            format!("&date={compact}"),
        ),
        App::Intracity => (
            "internalflowhistory.jsonp",
            String::new(),
            format!("&date={compact}"),
        ),
        App::History => (
            "historycurve.jsonp",
            format!("&type=move_{direction}"),
            String::new(),
        ),
    };

    Ok(format!(
        "{}/{}?dt=city&id={}{}{}&callback=jsonp_{}000_0000000",
        endpoint.trim_end_matches('/'),
        path,
        code,
        type_param,
        date_param,
        timestamp
    ))
}

fn local_midnight_timestamp(day: NaiveDate) -> Result<i64> {
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| MobilityError::InvalidDate {
            value: day.to_string(),
        })?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|moment| moment.timestamp())
        .ok_or_else(|| MobilityError::InvalidDate {
            value: day.to_string(),
        })
}
