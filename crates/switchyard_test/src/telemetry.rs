use std::sync::Mutex;

use switchyard_host::{TelemetryEvent, TelemetrySink};

/// Telemetry sink that keeps every event for later assertion.
#[derive(Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn send(&self, event: TelemetryEvent) {
        self.events.lock().unwrap().push(event);
    }
}
