use switchyard_project::TestFramework;

/// Telemetry events emitted by the execution coordinator.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TelemetryEvent {
    /// One per project a run was attempted for.
    TestRun {
        framework: TestFramework,
        debugging: bool,
    },
}

pub trait TelemetrySink: Send + Sync {
    fn send(&self, event: TelemetryEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn send(&self, _event: TelemetryEvent) {}
}
