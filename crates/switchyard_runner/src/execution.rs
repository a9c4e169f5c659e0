use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use switchyard_host::{
    DebugLauncher, EnvironmentProvider, ExecutionAdapter as _, ProcessFactory, RunRequest,
    TelemetryEvent, TelemetrySink, TestItem, TestRunSink,
};
use switchyard_logging::format_duration;
use switchyard_registry::ProjectAdapter;
use switchyard_router::{ProjectGroup, group_test_items_by_project};

/// External collaborators threaded through a multi-project execution.
pub struct ExecutionDependencies {
    pub provider: Arc<dyn EnvironmentProvider>,
    pub processes: Arc<dyn ProcessFactory>,
    pub debug_launcher: Arc<dyn DebugLauncher>,
    pub telemetry: Arc<dyn TelemetrySink>,
}

/// Executes one test-run request across every project that owns part of
/// the selection.
///
/// Projects run concurrently as interleaved futures; a failing project is
/// logged and does not disturb its siblings, and the whole operation
/// respects `token` at entry and before each project starts. Returns once
/// every per-project execution has finished, succeeded or not.
pub async fn execute_tests_for_projects(
    projects: &[Arc<ProjectAdapter>],
    items: &[Arc<TestItem>],
    request: &RunRequest,
    sink: &Arc<dyn TestRunSink>,
    token: &CancellationToken,
    deps: &ExecutionDependencies,
) {
    if projects.is_empty() {
        tracing::error!("No projects provided for execution");
        return;
    }
    if token.is_cancelled() {
        tracing::info!("Execution cancelled before starting");
        return;
    }

    let groups = group_test_items_by_project(items, projects, deps.provider.as_ref()).await;

    let is_debug = request.profile_kind.is_debug();
    tracing::info!(
        "Executing tests across {} project(s), debug={is_debug}",
        groups.len()
    );

    if request.profile_kind.is_coverage() {
        let covered = groups
            .values()
            .map(|group| Arc::clone(&group.project))
            .collect();
        install_shared_coverage_loader(sink, covered);
    }

    let executions = groups.into_values().map(|group| {
        let token = token.clone();
        let sink = Arc::clone(sink);
        async move {
            if token.is_cancelled() {
                tracing::info!(
                    "Skipping `{}`, cancellation requested",
                    group.project.project().name()
                );
                return;
            }

            let name = group.project.project().name().to_string();
            tracing::info!(
                "Executing {} test item(s) for project `{name}`",
                group.items.len()
            );

            deps.telemetry.send(TelemetryEvent::TestRun {
                framework: group.project.project().framework(),
                debugging: is_debug,
            });

            let start = Instant::now();
            match execute_tests_for_project(&group, request, &sink, deps).await {
                Ok(()) => {
                    tracing::debug!(
                        "Project `{name}` finished in {}",
                        format_duration(start.elapsed())
                    );
                }
                Err(error) => {
                    // Cancellation is an expected way for an execution to
                    // end, not a failure of the project.
                    if token.is_cancelled() {
                        tracing::debug!("Execution of `{name}` ended by cancellation: {error:#}");
                    } else {
                        tracing::error!("Execution failed for project `{name}`: {error:#}");
                    }
                }
            }
        }
    });

    join_all(executions).await;

    if token.is_cancelled() {
        tracing::info!("Project executions cancelled");
    } else {
        tracing::info!("All project executions completed");
    }
}

/// Runs one project's share of the selection through its execution
/// adapter, using the environment bound to that project.
async fn execute_tests_for_project(
    group: &ProjectGroup,
    request: &RunRequest,
    sink: &Arc<dyn TestRunSink>,
    deps: &ExecutionDependencies,
) -> anyhow::Result<()> {
    let project = group.project.project();
    let resolver = group.project.resolver();

    let mut seen: HashSet<String> = HashSet::new();
    let mut run_ids: Vec<String> = Vec::new();

    for item in &group.items {
        for case in test_case_nodes(item) {
            // Overlapping selections (a class and one of its methods, say)
            // reach the same leaf twice; start and run it once.
            if !seen.insert(case.id().to_string()) {
                continue;
            }
            sink.started(&case);
            if let Some(run_id) = resolver.run_id_for(case.id()) {
                run_ids.push(run_id);
            }
        }
    }

    if run_ids.is_empty() {
        tracing::debug!("No run ids found for project `{}`", project.name());
        return Ok(());
    }

    tracing::info!(
        "Running {} test(s) for project `{}`",
        run_ids.len(),
        project.name()
    );

    group
        .project
        .execution_adapter()
        .run_tests(
            project.root(),
            &run_ids,
            request.profile_kind,
            Arc::clone(sink),
            Arc::clone(&deps.processes),
            Arc::clone(&deps.debug_launcher),
            // No interpreter hint: the project carries its own environment.
            None,
            project,
        )
        .await
}

/// Depth-first leaves of a test-item subtree; a childless node is its own
/// leaf.
#[must_use]
pub fn test_case_nodes(item: &Arc<TestItem>) -> Vec<Arc<TestItem>> {
    let mut leaves = Vec::new();
    collect_leaves(item, &mut leaves);
    leaves
}

fn collect_leaves(item: &Arc<TestItem>, leaves: &mut Vec<Arc<TestItem>>) {
    if item.is_leaf() {
        leaves.push(Arc::clone(item));
        return;
    }
    for child in item.children() {
        collect_leaves(child, leaves);
    }
}

/// Installs one coverage loader shared by every project in the run: the
/// first project with recorded detail for a file answers, unknown files
/// yield an empty result.
fn install_shared_coverage_loader(
    sink: &Arc<dyn TestRunSink>,
    projects: Vec<Arc<ProjectAdapter>>,
) {
    sink.set_coverage_loader(Box::new(move |file| {
        projects
            .iter()
            .find_map(|project| project.resolver().coverage_for(file))
            .unwrap_or_default()
    }));
}
