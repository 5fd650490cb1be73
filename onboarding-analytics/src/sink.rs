//! Analytics sink trait and in-crate implementations.
//!
//! A sink is the boundary to whatever actually transmits events. Tracking is
//! fire-and-forget: a sink never reports failure back to the tracker, it deals
//! with (or drops) its own errors.
//!
//! - `LogSink`: writes every event to the `log` facade.
//! - `RecordingSink`: keeps events in memory for tests and inspection.

use crate::types::Parameters;

/// Destination for tracked events
pub trait AnalyticsSink {
    /// Transmit a single event. Must not panic on transport failures.
    fn log(&mut self, key: &str, parameters: &Parameters);
}

impl<S: AnalyticsSink + ?Sized> AnalyticsSink for &mut S {
    fn log(&mut self, key: &str, parameters: &Parameters) {
        (**self).log(key, parameters);
    }
}

impl<S: AnalyticsSink + ?Sized> AnalyticsSink for Box<S> {
    fn log(&mut self, key: &str, parameters: &Parameters) {
        (**self).log(key, parameters);
    }
}

/// Sink that forwards events to the `log` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl AnalyticsSink for LogSink {
    fn log(&mut self, key: &str, parameters: &Parameters) {
        if parameters.is_empty() {
            log::info!("analytics event {}", key);
        } else {
            let rendered: Vec<String> = parameters
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            log::info!("analytics event {} [{}]", key, rendered.join(", "));
        }
    }
}

/// An event as received by a sink
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    pub key: String,
    pub parameters: Parameters,
}

/// Sink that stores events in memory, in arrival order
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<LoggedEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take all recorded events, leaving the sink empty
    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.events)
    }
}

impl AnalyticsSink for RecordingSink {
    fn log(&mut self, key: &str, parameters: &Parameters) {
        self.events.push(LoggedEvent {
            key: key.to_string(),
            parameters: parameters.clone(),
        });
    }
}
