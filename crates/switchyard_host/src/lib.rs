//! Contracts between the routing engine and its external collaborators:
//! the host editor's test-run UI, the Python environment manager, the
//! framework-specific adapters, the debug service, and telemetry.
//!
//! Everything here is a seam. The engine never talks to an editor API or
//! spawns a process directly; it goes through these traits, and tests
//! substitute recording fakes for them.

mod adapters;
mod debug;
mod item;
mod provider;
mod run;
mod sink;
mod telemetry;

pub use adapters::{AdapterFactory, DiscoveryAdapter, ExecutionAdapter, ProcessFactory};
pub use debug::{DebugConfig, DebugHost, DebugLauncher, DebugSessionEvent};
pub use item::TestItem;
pub use provider::{
    DiscoveredProject, EnvironmentProvider, NullEnvironmentProvider, SettingsProvider,
    StaticSettings,
};
pub use run::{CoverageDetail, ProfileKind, RunRequest};
pub use sink::{CoverageLoader, TestRunSink};
pub use telemetry::{NullTelemetry, TelemetryEvent, TelemetrySink};
