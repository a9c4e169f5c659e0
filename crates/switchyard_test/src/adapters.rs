use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use switchyard_host::{
    AdapterFactory, DebugConfig, DebugLauncher, DiscoveryAdapter, ExecutionAdapter, ProcessFactory,
    ProfileKind, TestRunSink,
};
use switchyard_project::path::{SystemPath, SystemPathBuf};
use switchyard_project::{Project, ProjectId, PythonEnvironment, TestFramework};
use switchyard_registry::ProjectAdapter;
use tokio_util::sync::CancellationToken;

/// One recorded `run_tests` invocation.
#[derive(Debug, Clone)]
pub struct ExecutionCall {
    pub root: SystemPathBuf,
    pub run_ids: Vec<String>,
    pub profile_kind: ProfileKind,
    pub project_id: ProjectId,
    pub interpreter_hint: Option<PythonEnvironment>,
}

/// Execution adapter that records every call; optionally fails each one.
#[derive(Default)]
pub struct RecordingExecutionAdapter {
    calls: Mutex<Vec<ExecutionCall>>,
    fail: bool,
}

impl RecordingExecutionAdapter {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    #[must_use]
    pub fn calls(&self) -> Vec<ExecutionCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionAdapter for RecordingExecutionAdapter {
    async fn run_tests(
        &self,
        root: &SystemPath,
        run_ids: &[String],
        profile_kind: ProfileKind,
        _sink: Arc<dyn TestRunSink>,
        _processes: Arc<dyn ProcessFactory>,
        _debug_launcher: Arc<dyn DebugLauncher>,
        interpreter_hint: Option<&PythonEnvironment>,
        project: &Project,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(ExecutionCall {
            root: root.to_path_buf(),
            run_ids: run_ids.to_vec(),
            profile_kind,
            project_id: project.id().clone(),
            interpreter_hint: interpreter_hint.cloned(),
        });
        if self.fail {
            return Err(anyhow!("test runner exploded"));
        }
        Ok(())
    }
}

/// Discovery adapter that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiscoveryAdapter;

#[async_trait]
impl DiscoveryAdapter for NoopDiscoveryAdapter {
    async fn discover_tests(&self, _project: &Project) -> Result<()> {
        Ok(())
    }
}

/// Process factory that pretends every process exits cleanly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProcessFactory;

#[async_trait]
impl ProcessFactory for NoopProcessFactory {
    async fn run(&self, _program: &SystemPath, _args: &[String], _cwd: &SystemPath) -> Result<i32> {
        Ok(0)
    }
}

/// One recorded process spawn.
#[derive(Debug, Clone)]
pub struct SpawnedProcess {
    pub program: SystemPathBuf,
    pub args: Vec<String>,
    pub cwd: SystemPathBuf,
}

/// Process factory that records every spawn and reports exit code 0.
#[derive(Default)]
pub struct RecordingProcessFactory {
    spawned: Mutex<Vec<SpawnedProcess>>,
}

impl RecordingProcessFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn spawned(&self) -> Vec<SpawnedProcess> {
        self.spawned.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessFactory for RecordingProcessFactory {
    async fn run(&self, program: &SystemPath, args: &[String], cwd: &SystemPath) -> Result<i32> {
        self.spawned.lock().unwrap().push(SpawnedProcess {
            program: program.to_path_buf(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        });
        Ok(0)
    }
}

/// Debug launcher that resolves immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDebugLauncher;

#[async_trait]
impl DebugLauncher for NoopDebugLauncher {
    async fn launch(&self, _config: DebugConfig, _token: &CancellationToken) -> Result<()> {
        Ok(())
    }
}

/// Factory handing every project a fresh pair of no-op adapters.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubAdapterFactory;

impl AdapterFactory for StubAdapterFactory {
    fn create_adapters(
        &self,
        _framework: TestFramework,
    ) -> (Arc<dyn DiscoveryAdapter>, Arc<dyn ExecutionAdapter>) {
        (
            Arc::new(NoopDiscoveryAdapter),
            RecordingExecutionAdapter::new(),
        )
    }
}

/// Factory that keeps a handle on every execution adapter it creates, so
/// tests can assert on calls made against registry-built projects.
#[derive(Default)]
pub struct RecordingAdapterFactory {
    created: Mutex<Vec<Arc<RecordingExecutionAdapter>>>,
}

impl RecordingAdapterFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Execution adapters in creation order (= registration order).
    #[must_use]
    pub fn created(&self) -> Vec<Arc<RecordingExecutionAdapter>> {
        self.created.lock().unwrap().clone()
    }

    /// Every call recorded across all created adapters.
    #[must_use]
    pub fn all_calls(&self) -> Vec<ExecutionCall> {
        self.created()
            .iter()
            .flat_map(|adapter| adapter.calls())
            .collect()
    }
}

impl AdapterFactory for RecordingAdapterFactory {
    fn create_adapters(
        &self,
        _framework: TestFramework,
    ) -> (Arc<dyn DiscoveryAdapter>, Arc<dyn ExecutionAdapter>) {
        let execution = RecordingExecutionAdapter::new();
        self.created.lock().unwrap().push(Arc::clone(&execution));
        (Arc::new(NoopDiscoveryAdapter), execution)
    }
}

/// Builds a project rooted at `root` for unit tests.
#[must_use]
pub fn test_project(root: &str, workspace: &str) -> Project {
    let root = SystemPathBuf::from(root);
    let name = root.file_name().unwrap_or("project").to_string();
    Project::new(
        name,
        root,
        SystemPathBuf::from(workspace),
        PythonEnvironment::placeholder(),
        TestFramework::Pytest,
    )
}

/// Builds a project adapter around an execution adapter of the test's
/// choosing.
#[must_use]
pub fn test_project_adapter(
    root: &str,
    workspace: &str,
    execution: Arc<dyn ExecutionAdapter>,
) -> Arc<ProjectAdapter> {
    Arc::new(ProjectAdapter::new(
        test_project(root, workspace),
        Arc::new(NoopDiscoveryAdapter),
        execution,
    ))
}
