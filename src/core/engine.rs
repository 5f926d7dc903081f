use crate::domain::ports::{Pipeline, Sink};
use crate::utils::error::Result;

/// Drives one report run: header first, then one fetch per date, strictly
/// in order. Each date's rows are flushed before the next fetch is
/// issued, so a failure partway through a range keeps everything already
/// written.
pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self, sink: &mut dyn Sink) -> Result<usize> {
        sink.write_line(&self.pipeline.header())?;

        let mut rows = 0;
        for date in self.pipeline.dates() {
            let payload = self.pipeline.extract(date).await?;
            let lines = self.pipeline.transform(date, payload)?;
            for line in &lines {
                sink.write_line(line)?;
            }
            sink.flush()?;
            tracing::debug!("{date}: {} rows", lines.len());
            rows += lines.len();
        }

        Ok(rows)
    }
}
