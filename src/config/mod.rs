pub mod cli;

use clap::Parser;

use crate::core::dates;
use crate::domain::model::{App, CityName, Direction, Query};
use crate::domain::ports::Sink;
use crate::utils::error::{MobilityError, Result};
use crate::utils::validation::{self, Validate};

use self::cli::{FileSink, StdoutSink};

#[derive(Debug, Clone, Parser)]
#[command(name = "mobility-fetch")]
#[command(about = "Retrieve population mobility indices from Baidu Huiyan as TSV")]
pub struct CliConfig {
    /// Dataset to query: intercity, intracity or history
    #[arg(short, long, default_value = "intercity")]
    pub app: String,

    /// The "Province City" to query (quoted, e.g. "Hubei Wuhan")
    #[arg(long, default_value = "Hubei Wuhan")]
    pub city: String,

    /// Flow direction relative to the queried city: in or out
    #[arg(short = 'm', long = "move", default_value = "in")]
    pub direction: String,

    /// Date "2020-03-01", or a range "2020-03-01:2020-03-26" (intercity only)
    #[arg(short, long, default_value = "2020-03-01")]
    pub date: String,

    /// Output file (standard output when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Base endpoint of the migration service
    #[arg(long, default_value = "https://huiyan.baidu.com/migration")]
    pub endpoint: String,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Parses the raw options into validated query parameters. A date
    /// range outside intercity mode is rejected here, before any fetch.
    pub fn query(&self) -> Result<Query> {
        let app: App = self.app.parse()?;
        let direction: Direction = self.direction.parse()?;
        let city = CityName::parse(&self.city)?;

        if self.date.contains(':') && app != App::Intercity {
            return Err(MobilityError::InvalidArgument {
                message: "a date range is only valid for intercity data".to_string(),
            });
        }
        let dates = dates::date_list(&self.date)?;

        Ok(Query {
            app,
            city,
            direction,
            dates,
        })
    }

    /// Opens the sink for the run: the configured file, or stdout.
    pub fn open_sink(&self) -> Result<Box<dyn Sink>> {
        match &self.output {
            Some(path) => Ok(Box::new(FileSink::create(path.as_ref())?)),
            None => Ok(Box::new(StdoutSink::new())),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("city", &self.city)?;
        self.query().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig::parse_from(["mobility-fetch"])
    }

    #[test]
    fn test_defaults_parse_to_a_valid_query() {
        let query = base_config().query().unwrap();
        assert_eq!(query.app, App::Intercity);
        assert_eq!(query.city.key(), "Hubei Wuhan");
        assert_eq!(query.direction, Direction::In);
        assert_eq!(query.dates, vec!["2020-03-01"]);
    }

    #[test]
    fn test_range_is_accepted_for_intercity() {
        let mut config = base_config();
        config.date = "2020-03-01:2020-03-03".to_string();
        assert_eq!(config.query().unwrap().dates.len(), 3);
    }

    #[test]
    fn test_range_is_rejected_outside_intercity() {
        for app in ["intracity", "history"] {
            let mut config = base_config();
            config.app = app.to_string();
            config.date = "2020-03-01:2020-03-03".to_string();
            let err = config.query().unwrap_err();
            assert!(matches!(err, MobilityError::InvalidArgument { .. }));
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_validate_covers_endpoint_and_city() {
        let mut config = base_config();
        config.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.city = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
