use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use switchyard_project::path::SystemPath;
use switchyard_project::{Project, PythonEnvironment, TestFramework};

use crate::debug::DebugLauncher;
use crate::run::ProfileKind;
use crate::sink::TestRunSink;

/// Spawns external tool processes (test runners, discovery scripts) on
/// behalf of the framework adapters. The engine only threads this through;
/// it never spawns processes itself.
#[async_trait]
pub trait ProcessFactory: Send + Sync {
    /// Runs `program` with `args` in `cwd` and returns its exit code.
    async fn run(&self, program: &SystemPath, args: &[String], cwd: &SystemPath) -> Result<i32>;
}

/// Framework-specific test discovery (pytest/unittest collection).
#[async_trait]
pub trait DiscoveryAdapter: Send + Sync {
    async fn discover_tests(&self, project: &Project) -> Result<()>;
}

/// Framework-specific test execution for one project.
#[async_trait]
pub trait ExecutionAdapter: Send + Sync {
    /// Runs the given framework-native test ids against `project`'s
    /// environment. `interpreter_hint` is only set in legacy single-project
    /// mode; project-based runs pass `None` and the adapter uses the
    /// environment bound to `project`.
    async fn run_tests(
        &self,
        root: &SystemPath,
        run_ids: &[String],
        profile_kind: ProfileKind,
        sink: Arc<dyn TestRunSink>,
        processes: Arc<dyn ProcessFactory>,
        debug_launcher: Arc<dyn DebugLauncher>,
        interpreter_hint: Option<&PythonEnvironment>,
        project: &Project,
    ) -> Result<()>;
}

/// Builds the per-project (discovery, execution) adapter pair for a
/// framework choice. One pair is created per registered project.
pub trait AdapterFactory: Send + Sync {
    fn create_adapters(
        &self,
        framework: TestFramework,
    ) -> (Arc<dyn DiscoveryAdapter>, Arc<dyn ExecutionAdapter>);
}
