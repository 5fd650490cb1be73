//! JSON-lines analytics sink
//!
//! Writes one JSON object per event. Write failures are logged and dropped,
//! the tracker never sees them.

use onboarding_analytics::{AnalyticsSink, Parameters};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonLine<'a> {
    event: &'a str,
    parameters: &'a Parameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

pub struct JsonLinesSink<W: Write> {
    writer: W,
    include_timestamp: bool,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W, include_timestamp: bool) -> Self {
        Self {
            writer,
            include_timestamp,
            written: 0,
        }
    }

    /// Number of events successfully written
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &JsonLine<'_>) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, line)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> AnalyticsSink for JsonLinesSink<W> {
    fn log(&mut self, key: &str, parameters: &Parameters) {
        let line = JsonLine {
            event: key,
            parameters,
            timestamp: self
                .include_timestamp
                .then(|| chrono::Utc::now().to_rfc3339()),
        };

        match self.write_line(&line) {
            Ok(()) => self.written += 1,
            Err(e) => log::warn!("Dropping analytics event {}: {}", key, e),
        }
    }
}
