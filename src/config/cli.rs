use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::domain::ports::Sink;
use crate::utils::error::Result;

/// Buffered file sink, truncating on create.
pub struct FileSink {
    inner: BufWriter<File>,
}

impl FileSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            inner: BufWriter::new(file),
        })
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.inner, "{line}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Standard output sink, used when no output file is configured.
pub struct StdoutSink {
    inner: io::Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            inner: io::stdout(),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdoutSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.inner, "{line}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
