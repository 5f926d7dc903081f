use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::utils::error::{MobilityError, Result};

/// Which remote dataset to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum App {
    /// Ranked flows between the queried city and other cities.
    Intercity,
    /// Flow intensity within the queried city over its history.
    Intracity,
    /// The full history curve of flow in one direction.
    History,
}

impl FromStr for App {
    type Err = MobilityError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "intercity" => Ok(App::Intercity),
            "intracity" => Ok(App::Intracity),
            "history" => Ok(App::History),
            other => Err(MobilityError::InvalidArgument {
                message: format!("unknown app \"{other}\" (expected intercity, intracity or history)"),
            }),
        }
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            App::Intercity => write!(f, "intercity"),
            App::Intracity => write!(f, "intracity"),
            App::History => write!(f, "history"),
        }
    }
}

/// Flow direction relative to the queried city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl FromStr for Direction {
    type Err = MobilityError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            other => Err(MobilityError::InvalidArgument {
                message: format!("unknown direction \"{other}\" (expected in or out)"),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
        }
    }
}

/// A queried city, split from the CLI's "Province City" string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityName {
    pub province: String,
    pub city: String,
}

impl CityName {
    /// Splits on the last whitespace run. Province names may contain
    /// spaces ("Inner Mongolia"); city names may not. Known limitation
    /// inherited from the code table's key format.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let at = trimmed
            .rfind(char::is_whitespace)
            .ok_or_else(|| CityName::bad(raw))?;
        let province = trimmed[..at].trim_end();
        let city = trimmed[at..].trim_start();
        if province.is_empty() || city.is_empty() {
            return Err(CityName::bad(raw));
        }
        Ok(Self {
            province: province.to_string(),
            city: city.to_string(),
        })
    }

    /// The "Province City" key used by the code table.
    pub fn key(&self) -> String {
        format!("{} {}", self.province, self.city)
    }

    fn bad(raw: &str) -> MobilityError {
        MobilityError::InvalidArgument {
            message: format!("expected a quoted \"Province City\" pair, got \"{raw}\""),
        }
    }
}

/// Validated query parameters; dates are already expanded.
#[derive(Debug, Clone)]
pub struct Query {
    pub app: App,
    pub city: CityName,
    pub direction: Direction,
    pub dates: Vec<String>,
}

/// One intercity ranking entry as returned by the service. The index
/// value is kept as raw JSON so it reaches the output uncoerced.
#[derive(Debug, Clone, Deserialize)]
pub struct RankEntry {
    pub province_name: String,
    pub city_name: String,
    pub value: Value,
}

/// An unwrapped response body.
#[derive(Debug)]
pub enum Payload {
    /// Intercity: ranked per-city entries.
    Ranked(Vec<RankEntry>),
    /// Intracity/history: ordered date -> index pairs.
    Series(Vec<(String, Value)>),
}

impl Payload {
    /// Picks the mode-specific shape out of the service envelope
    /// `{"errno": .., "data": {"list": ..}}`.
    pub fn from_response(app: App, body: Value) -> Result<Self> {
        let list = body
            .get("data")
            .and_then(|data| data.get("list"))
            .ok_or_else(|| MobilityError::MalformedResponse {
                message: "response has no data.list section".to_string(),
            })?;

        match app {
            App::Intercity => {
                let entries: Vec<RankEntry> =
                    serde_json::from_value(list.clone()).map_err(|e| {
                        MobilityError::MalformedResponse {
                            message: format!("unexpected ranking entry: {e}"),
                        }
                    })?;
                Ok(Payload::Ranked(entries))
            }
            App::Intracity | App::History => {
                let map = list
                    .as_object()
                    .ok_or_else(|| MobilityError::MalformedResponse {
                        message: "expected a date-to-value object in data.list".to_string(),
                    })?;
                Ok(Payload::Series(
                    map.iter()
                        .map(|(date, value)| (date.clone(), value.clone()))
                        .collect(),
                ))
            }
        }
    }
}
