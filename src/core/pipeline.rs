use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::directory::CityDirectory;
use crate::core::resolver::NameResolver;
use crate::core::{jsonp, report, url};
use crate::domain::model::{Payload, Query};
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Fetches and formats migration data for one validated query.
pub struct MigrationPipeline {
    client: Client,
    endpoint: String,
    query: Query,
    code: u32,
    resolver: NameResolver,
}

impl MigrationPipeline {
    /// Resolves the queried city's service code up front, so an unknown
    /// city fails before any fetch is attempted.
    pub fn new(
        endpoint: impl Into<String>,
        query: Query,
        directory: Arc<CityDirectory>,
    ) -> Result<Self> {
        let code = directory.code(&query.city.key())?;
        Ok(Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            query,
            code,
            resolver: NameResolver::new(directory),
        })
    }
}

#[async_trait]
impl Pipeline for MigrationPipeline {
    fn dates(&self) -> &[String] {
        &self.query.dates
    }

    fn header(&self) -> String {
        report::header(&self.query)
    }

    async fn extract(&self, date: &str) -> Result<Payload> {
        let request_url = url::build_url(
            &self.endpoint,
            self.query.app,
            self.code,
            self.query.direction,
            date,
        )?;
        tracing::info!("retrieving {request_url}");

        let response = self
            .client
            .get(&request_url)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        tracing::debug!("response is {} bytes", body.len());

        Payload::from_response(self.query.app, jsonp::unwrap(&body)?)
    }

    fn transform(&self, date: &str, payload: Payload) -> Result<Vec<String>> {
        match payload {
            Payload::Ranked(entries) => Ok(report::format_intercity_rows(
                date,
                &entries,
                &self.resolver,
                &self.query,
            )),
            Payload::Series(points) => Ok(report::format_series_rows(&points, &self.query)),
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;
    use crate::domain::model::{App, CityName, Direction};
    use crate::utils::error::MobilityError;

    fn query(app: App, direction: Direction, dates: &[&str]) -> Query {
        Query {
            app,
            city: CityName {
                province: "Hubei".to_string(),
                city: "Wuhan".to_string(),
            },
            direction,
            dates: dates.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn directory() -> Arc<CityDirectory> {
        Arc::new(CityDirectory::load().unwrap())
    }

    #[test]
    fn test_unknown_city_fails_before_any_fetch() {
        let bad = Query {
            city: CityName {
                province: "Atlantis".to_string(),
                city: "Nowhere".to_string(),
            },
            ..query(App::Intercity, Direction::In, &["2020-03-01"])
        };
        let err = MigrationPipeline::new("http://unused", bad, directory()).unwrap_err();
        assert!(matches!(err, MobilityError::UnknownCity { .. }));
    }

    #[tokio::test]
    async fn test_extract_intercity_payload() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/cityrank.jsonp")
                .query_param("dt", "city")
                .query_param("id", "420100")
                .query_param("type", "move_in")
                .query_param("date", "20200301");
            then.status(200).body(
                r#"jsonp_1583020800000_0000000({"errno":0,"data":{"list":[{"city_name":"孝感","province_name":"湖北","value":3.54}]}})"#,
            );
        });

        let pipeline = MigrationPipeline::new(
            server.base_url(),
            query(App::Intercity, Direction::In, &["2020-03-01"]),
            directory(),
        )
        .unwrap();

        let payload = pipeline.extract("2020-03-01").await.unwrap();
        mock.assert();
        match payload {
            Payload::Ranked(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].city_name, "孝感");
                assert_eq!(entries[0].province_name, "湖北");
            }
            other => panic!("expected ranked payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_extract_series_payload() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/internalflowhistory.jsonp");
            then.status(200)
                .body(r#"cb({"errno":0,"data":{"list":{"20200301":5.97,"20200302":6.12}}})"#);
        });

        let pipeline = MigrationPipeline::new(
            server.base_url(),
            query(App::Intracity, Direction::In, &["2020-03-01"]),
            directory(),
        )
        .unwrap();

        let payload = pipeline.extract("2020-03-01").await.unwrap();
        mock.assert();
        match payload {
            Payload::Series(points) => assert_eq!(points.len(), 2),
            other => panic!("expected series payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_failure_is_a_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cityrank.jsonp");
            then.status(500);
        });

        let pipeline = MigrationPipeline::new(
            server.base_url(),
            query(App::Intercity, Direction::In, &["2020-03-01"]),
            directory(),
        )
        .unwrap();

        let err = pipeline.extract("2020-03-01").await.unwrap_err();
        assert!(matches!(err, MobilityError::Transport(_)));
    }

    #[tokio::test]
    async fn test_body_without_envelope_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cityrank.jsonp");
            then.status(200).body("<html>service is down</html>");
        });

        let pipeline = MigrationPipeline::new(
            server.base_url(),
            query(App::Intercity, Direction::In, &["2020-03-01"]),
            directory(),
        )
        .unwrap();

        let err = pipeline.extract("2020-03-01").await.unwrap_err();
        assert!(matches!(err, MobilityError::MalformedResponse { .. }));
    }
}
