use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use switchyard::path::{SystemPath, SystemPathBuf};
use switchyard::{
    CoverageDetail, DebugLauncher, EnvironmentProvider, ExecutionAdapter, ExecutionDependencies,
    ProcessFactory, ProfileKind, Project, ProjectRegistry, PythonEnvironment, RunRequest,
    StaticSettings, TestItem, TestRunSink, execute_tests_for_projects,
};
use switchyard_test::{
    MockEnvironmentProvider, NoopDebugLauncher, NoopProcessFactory, RecordingAdapterFactory,
    RecordingProcessFactory, RecordingSink, RecordingTelemetry, test_project_adapter,
};

struct Workspace {
    registry: ProjectRegistry,
    provider: Arc<MockEnvironmentProvider>,
    factory: Arc<RecordingAdapterFactory>,
}

fn workspace(provider: MockEnvironmentProvider) -> Workspace {
    let provider = Arc::new(provider);
    let factory = Arc::new(RecordingAdapterFactory::new());
    let registry = ProjectRegistry::new(
        Arc::clone(&provider) as Arc<dyn EnvironmentProvider>,
        Arc::new(StaticSettings::default()),
        Arc::clone(&factory) as _,
    );
    Workspace {
        registry,
        provider,
        factory,
    }
}

#[tokio::test]
async fn a_run_spanning_two_projects_executes_each_with_its_own_ids() {
    let mut ws = workspace(
        MockEnvironmentProvider::available()
            .with_project("app", "/ws/app")
            .with_project("lib", "/ws/lib"),
    );
    let projects = ws
        .registry
        .discover_and_register_projects(SystemPath::new("/ws"))
        .await;

    for adapter in &projects {
        let prefix = adapter.project().root().file_name().unwrap().to_string();
        adapter
            .resolver()
            .record_run_id(format!("{prefix}::test"), format!("run-{prefix}"));
    }

    let items = vec![
        TestItem::leaf("app::test", Some(SystemPathBuf::from("/ws/app/test_a.py"))),
        TestItem::leaf("lib::test", Some(SystemPathBuf::from("/ws/lib/test_l.py"))),
        TestItem::leaf("stray", Some(SystemPathBuf::from("/tmp/test_s.py"))),
    ];

    let sink = Arc::new(RecordingSink::new());
    let telemetry = Arc::new(RecordingTelemetry::new());
    let deps = ExecutionDependencies {
        provider: Arc::clone(&ws.provider) as Arc<dyn EnvironmentProvider>,
        processes: Arc::new(NoopProcessFactory),
        debug_launcher: Arc::new(NoopDebugLauncher),
        telemetry: Arc::clone(&telemetry) as _,
    };

    let sink_dyn: Arc<dyn TestRunSink> = Arc::clone(&sink) as _;
    execute_tests_for_projects(
        &projects,
        &items,
        &RunRequest::new(ProfileKind::Run),
        &sink_dyn,
        &CancellationToken::new(),
        &deps,
    )
    .await;

    let calls = ws.factory.all_calls();
    assert_eq!(calls.len(), 2);
    let run_ids: HashSet<String> = calls
        .iter()
        .flat_map(|call| call.run_ids.iter().cloned())
        .collect();
    assert_eq!(
        run_ids,
        HashSet::from(["run-app".to_string(), "run-lib".to_string()])
    );
    for call in &calls {
        assert_eq!(call.run_ids.len(), 1);
        assert!(call.interpreter_hint.is_none());
    }

    let started: HashSet<String> = sink.started_ids().into_iter().collect();
    assert_eq!(
        started,
        HashSet::from(["app::test".to_string(), "lib::test".to_string()])
    );
    assert_eq!(telemetry.events().len(), 2);
}

#[tokio::test]
async fn coverage_details_are_served_across_project_boundaries() {
    let mut ws = workspace(
        MockEnvironmentProvider::available()
            .with_project("app", "/ws/app")
            .with_project("lib", "/ws/lib"),
    );
    let projects = ws
        .registry
        .discover_and_register_projects(SystemPath::new("/ws"))
        .await;

    let lib = projects
        .iter()
        .find(|adapter| adapter.project().root().as_str() == "/ws/lib")
        .unwrap();
    lib.resolver().record_run_id("lib::test", "run-lib");
    let details = vec![CoverageDetail::new(10, 2)];
    lib.resolver()
        .record_coverage(SystemPathBuf::from("/ws/lib/core.py"), details.clone());

    let app = projects
        .iter()
        .find(|adapter| adapter.project().root().as_str() == "/ws/app")
        .unwrap();
    app.resolver().record_run_id("app::test", "run-app");

    let items = vec![
        TestItem::leaf("app::test", Some(SystemPathBuf::from("/ws/app/test_a.py"))),
        TestItem::leaf("lib::test", Some(SystemPathBuf::from("/ws/lib/test_l.py"))),
    ];

    let sink = Arc::new(RecordingSink::new());
    let deps = ExecutionDependencies {
        provider: Arc::clone(&ws.provider) as Arc<dyn EnvironmentProvider>,
        processes: Arc::new(NoopProcessFactory),
        debug_launcher: Arc::new(NoopDebugLauncher),
        telemetry: Arc::new(RecordingTelemetry::new()),
    };

    let sink_dyn: Arc<dyn TestRunSink> = Arc::clone(&sink) as _;
    execute_tests_for_projects(
        &projects,
        &items,
        &RunRequest::new(ProfileKind::Coverage),
        &sink_dyn,
        &CancellationToken::new(),
        &deps,
    )
    .await;

    // One loader serves the whole run, whichever project owns the file.
    assert_eq!(
        sink.load_coverage(SystemPath::new("/ws/lib/core.py")),
        Some(details)
    );
    assert_eq!(
        sink.load_coverage(SystemPath::new("/ws/app/never_covered.py")),
        Some(Vec::new())
    );
}

/// Adapter that shells out the way the pytest adapter does: the bound
/// project environment's interpreter, run from the project root.
struct ProcessSpawningAdapter;

#[async_trait]
impl ExecutionAdapter for ProcessSpawningAdapter {
    async fn run_tests(
        &self,
        root: &SystemPath,
        run_ids: &[String],
        _profile_kind: ProfileKind,
        _sink: Arc<dyn TestRunSink>,
        processes: Arc<dyn ProcessFactory>,
        _debug_launcher: Arc<dyn DebugLauncher>,
        _interpreter_hint: Option<&PythonEnvironment>,
        project: &Project,
    ) -> Result<()> {
        let mut args = vec!["-m".to_string(), "pytest".to_string()];
        args.extend(run_ids.iter().cloned());
        processes
            .run(project.environment().executable(), &args, root)
            .await?;
        Ok(())
    }
}

#[tokio::test]
async fn adapters_spawn_through_the_injected_process_factory() {
    let project = test_project_adapter("/ws/app", "/ws", Arc::new(ProcessSpawningAdapter));
    project.resolver().record_run_id("app::test", "run-app");

    let processes = Arc::new(RecordingProcessFactory::new());
    let deps = ExecutionDependencies {
        provider: Arc::new(switchyard::NullEnvironmentProvider),
        processes: Arc::clone(&processes) as Arc<dyn ProcessFactory>,
        debug_launcher: Arc::new(NoopDebugLauncher),
        telemetry: Arc::new(RecordingTelemetry::new()),
    };

    let sink: Arc<dyn TestRunSink> = Arc::new(RecordingSink::new());
    let items = vec![TestItem::leaf(
        "app::test",
        Some(SystemPathBuf::from("/ws/app/test_a.py")),
    )];
    execute_tests_for_projects(
        &[project],
        &items,
        &RunRequest::new(ProfileKind::Run),
        &sink,
        &CancellationToken::new(),
        &deps,
    )
    .await;

    let spawned = processes.spawned();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].program.as_str(), "python");
    assert_eq!(spawned[0].cwd.as_str(), "/ws/app");
    assert!(spawned[0].args.contains(&"run-app".to_string()));
}
