use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use switchyard::path::{SystemPath, SystemPathBuf};
use switchyard::{
    DebugConfig, DebugHost, DebugLauncher, ExecutionAdapter, ExecutionDependencies, ProcessFactory,
    ProfileKind, Project, PythonEnvironment, RunRequest, SessionDebugLauncher, TestItem,
    TestRunSink,
};
use switchyard_test::{
    DebugHostBehavior, NoopProcessFactory, RecordingSink, RecordingTelemetry, ScriptedDebugHost,
    test_project_adapter,
};

/// Adapter that immediately hands off to the debug launcher, the way a
/// pytest adapter does for a debug profile.
struct DebuggingAdapter;

#[async_trait]
impl ExecutionAdapter for DebuggingAdapter {
    async fn run_tests(
        &self,
        _root: &SystemPath,
        _run_ids: &[String],
        _profile_kind: ProfileKind,
        _sink: Arc<dyn TestRunSink>,
        _processes: Arc<dyn ProcessFactory>,
        debug_launcher: Arc<dyn DebugLauncher>,
        _interpreter_hint: Option<&PythonEnvironment>,
        project: &Project,
    ) -> Result<()> {
        let config = DebugConfig::new(format!("Debug Tests: {}", project.name()));
        debug_launcher
            .launch(config, &CancellationToken::new())
            .await
    }
}

#[tokio::test]
async fn parallel_debug_sessions_are_correlated_by_marker() {
    let host = Arc::new(ScriptedDebugHost::new(DebugHostBehavior::AutoTerminate));
    let launcher = Arc::new(SessionDebugLauncher::new(
        Arc::clone(&host) as Arc<dyn DebugHost>
    ));

    let execution: Arc<dyn ExecutionAdapter> = Arc::new(DebuggingAdapter);
    let project_a = test_project_adapter("/ws/a", "/ws", Arc::clone(&execution));
    let project_b = test_project_adapter("/ws/b", "/ws", execution);
    project_a.resolver().record_run_id("a::t", "ra");
    project_b.resolver().record_run_id("b::t", "rb");

    let items = vec![
        TestItem::leaf("a::t", Some(SystemPathBuf::from("/ws/a/test_a.py"))),
        TestItem::leaf("b::t", Some(SystemPathBuf::from("/ws/b/test_b.py"))),
    ];

    let sink: Arc<dyn TestRunSink> = Arc::new(RecordingSink::new());
    let deps = ExecutionDependencies {
        provider: Arc::new(switchyard::NullEnvironmentProvider),
        processes: Arc::new(NoopProcessFactory),
        debug_launcher: launcher,
        telemetry: Arc::new(RecordingTelemetry::new()),
    };

    switchyard::execute_tests_for_projects(
        &[project_a, project_b],
        &items,
        &RunRequest::new(ProfileKind::Debug),
        &sink,
        &CancellationToken::new(),
        &deps,
    )
    .await;

    let launched = host.launched();
    assert_eq!(launched.len(), 2);

    let markers: HashSet<String> = launched
        .iter()
        .map(|config| config.session_marker.clone().unwrap())
        .collect();
    assert_eq!(markers.len(), 2, "each launch must get its own marker");

    let names: HashSet<String> = launched
        .iter()
        .map(|config| config.name.clone())
        .collect();
    assert_eq!(
        names,
        HashSet::from([
            "Debug Tests: a".to_string(),
            "Debug Tests: b".to_string()
        ])
    );
}
