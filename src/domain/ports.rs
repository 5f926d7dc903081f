use crate::domain::model::Payload;
use crate::utils::error::Result;
use async_trait::async_trait;

/// A line-oriented output destination, owned by the engine for one run.
pub trait Sink: Send {
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Dates to iterate, in order. Always at least one entry.
    fn dates(&self) -> &[String];
    /// Header line, written once before any data row.
    fn header(&self) -> String;
    /// One HTTP round trip: fetch and unwrap the payload for `date`.
    async fn extract(&self, date: &str) -> Result<Payload>;
    /// Resolve names and format the payload into output rows.
    fn transform(&self, date: &str, payload: Payload) -> Result<Vec<String>>;
}
