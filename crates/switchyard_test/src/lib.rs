//! Shared test doubles for the switchyard crates: a scriptable
//! environment provider, recording adapters/sinks, and an in-memory debug
//! host. Dev-dependency only; never ships in a release surface.

mod adapters;
mod debug;
mod provider;
mod sink;
mod telemetry;

pub use adapters::{
    ExecutionCall, NoopDebugLauncher, NoopDiscoveryAdapter, NoopProcessFactory,
    RecordingAdapterFactory, RecordingExecutionAdapter, RecordingProcessFactory, SpawnedProcess,
    StubAdapterFactory, test_project, test_project_adapter,
};
pub use debug::{DebugHostBehavior, ScriptedDebugHost};
pub use provider::MockEnvironmentProvider;
pub use sink::RecordingSink;
pub use telemetry::RecordingTelemetry;
