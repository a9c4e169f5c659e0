//! Project-scoped test routing engine for Python workspaces.
//!
//! A workspace may contain several Python projects, each with its own
//! root directory and interpreter. This crate ties the pieces together:
//!
//! - [`ProjectRegistry`] discovers the projects of a workspace (through
//!   the host's environment manager, with a single-project fallback) and
//!   computes nested-project ignore lists;
//! - [`group_test_items_by_project`] assigns an arbitrary test-item
//!   selection to the projects that own the items, preferring the most
//!   deeply nested root;
//! - [`execute_tests_for_projects`] runs or debugs each project's share
//!   concurrently, isolating failures and cancellation per project and
//!   sharing one coverage loader across the run.
//!
//! The host editor, the test frameworks, and the debugger stay behind the
//! trait seams in [`switchyard_host`].

pub use switchyard_host::{
    AdapterFactory, CoverageDetail, CoverageLoader, DebugConfig, DebugHost, DebugLauncher,
    DebugSessionEvent, DiscoveredProject, DiscoveryAdapter, EnvironmentProvider, ExecutionAdapter,
    NullEnvironmentProvider, NullTelemetry, ProcessFactory, ProfileKind, RunRequest,
    SettingsProvider, StaticSettings, TelemetryEvent, TelemetrySink, TestItem, TestRunSink,
};
pub use switchyard_logging::{VerbosityLevel, format_duration, setup_tracing};
pub use switchyard_project::{
    Project, ProjectId, PythonEnvironment, TestFramework, WorkspaceSettings, path,
    project_display_name,
};
pub use switchyard_registry::{
    ProjectAdapter, ProjectRegistry, ProjectResolutionError, ResultResolver,
};
pub use switchyard_router::{
    ProjectGroup, RunLookupCache, find_project_for_test_item, group_test_items_by_project,
};
pub use switchyard_runner::{
    ExecutionDependencies, SessionDebugLauncher, execute_tests_for_projects, test_case_nodes,
};
