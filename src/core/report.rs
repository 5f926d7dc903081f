use serde_json::Value;

use crate::core::resolver::NameResolver;
use crate::domain::model::{App, Direction, Query, RankEntry};

/// Header line for the configured mode, written once per run.
pub fn header(query: &Query) -> String {
    match query.app {
        App::Intercity => [
            "Date",
            "Province_CN",
            "City_CN",
            "From_Province",
            "From_City",
            "To_Province",
            "To_City",
            "Index",
        ]
        .join("\t"),
        App::Intracity => ["Date", "Within_Province", "Within_City", "Index"].join("\t"),
        App::History => match query.direction {
            Direction::In => ["Date", "To_Province", "To_City", "Index"].join("\t"),
            Direction::Out => ["Date", "From_Province", "From_City", "Index"].join("\t"),
        },
    }
}

/// Eight-column intercity rows. For `in` the remote city is the source
/// and the queried city the destination; for `out`, reversed.
pub fn format_intercity_rows(
    date: &str,
    entries: &[RankEntry],
    resolver: &NameResolver,
    query: &Query,
) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let (province_en, city_en) = resolver.resolve(&entry.province_name, &entry.city_name);
            let queried = &query.city;
            let (from_province, from_city, to_province, to_city) = match query.direction {
                Direction::In => (
                    province_en.as_str(),
                    city_en.as_str(),
                    queried.province.as_str(),
                    queried.city.as_str(),
                ),
                Direction::Out => (
                    queried.province.as_str(),
                    queried.city.as_str(),
                    province_en.as_str(),
                    city_en.as_str(),
                ),
            };
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                date,
                entry.province_name,
                entry.city_name,
                from_province,
                from_city,
                to_province,
                to_city,
                plain(&entry.value)
            )
        })
        .collect()
}

/// Four-column rows for the intracity and history series. Dates come
/// from the payload keys, the location is always the queried city.
pub fn format_series_rows(points: &[(String, Value)], query: &Query) -> Vec<String> {
    points
        .iter()
        .map(|(date, value)| {
            format!(
                "{}\t{}\t{}\t{}",
                date,
                query.city.province,
                query.city.city,
                plain(value)
            )
        })
        .collect()
}

/// Index values pass through as received; strings just lose their quotes.
fn plain(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
