//! Assigns test items to the projects that own them.
//!
//! Ownership is decided by file location: the project whose root is the
//! longest boundary-safe parent of the item's path wins, so a nested
//! project always beats the project it is nested in. When the environment
//! manager is present it gets a chance to answer first; its failures and
//! stale answers silently fall back to path matching.

mod cache;

use std::collections::HashMap;
use std::sync::Arc;

use switchyard_host::{EnvironmentProvider, TestItem};
use switchyard_project::ProjectId;
use switchyard_project::path::{SystemPath, contains_path, normalized_key};
use switchyard_registry::ProjectAdapter;

pub use cache::RunLookupCache;

/// The test items one run will execute against one project.
#[derive(Debug, Clone)]
pub struct ProjectGroup {
    pub project: Arc<ProjectAdapter>,
    pub items: Vec<Arc<TestItem>>,
}

/// Resolves the project owning `item`, if any.
///
/// Resolution order: run-scoped cache (hits and cached misses), then the
/// environment manager's owner lookup, then longest-matching-root path
/// search. Items without a file location cannot be routed. Provider
/// errors are contained here; they only ever mean "use path matching".
pub async fn find_project_for_test_item(
    item: &TestItem,
    projects: &[Arc<ProjectAdapter>],
    provider: &dyn EnvironmentProvider,
    cache: &mut RunLookupCache,
) -> Option<Arc<ProjectAdapter>> {
    let path = item.uri()?;

    if let Some(cached) = cache.lookup(path) {
        return cached;
    }

    if provider.is_available() {
        match provider.owner_project_of(path).await {
            Ok(Some(root)) => {
                if let Some(owner) = cache.project_at_root(&root) {
                    cache.insert(path, Some(owner.id()));
                    return Some(owner);
                }
                // The manager knows an owner we never registered: its
                // project list has drifted from ours.
                tracing::debug!(
                    "Owner `{root}` of `{path}` is not a registered project, \
                     falling back to path matching"
                );
            }
            Ok(None) => {}
            Err(error) => {
                tracing::debug!(
                    "Owner lookup failed for `{path}`, falling back to path matching: {error:#}"
                );
            }
        }
    }

    let owner = longest_matching_root(path, projects);
    cache.insert(path, owner.as_deref().map(ProjectAdapter::id));
    owner
}

/// Partitions `items` by owning project for one test run.
///
/// Every known project starts with an empty group so zero-match projects
/// can be dropped at the end; unroutable items are logged and skipped.
/// The returned map never contains an empty group.
pub async fn group_test_items_by_project(
    items: &[Arc<TestItem>],
    projects: &[Arc<ProjectAdapter>],
    provider: &dyn EnvironmentProvider,
) -> HashMap<ProjectId, ProjectGroup> {
    let mut groups: HashMap<ProjectId, ProjectGroup> = projects
        .iter()
        .map(|project| {
            (
                project.id().clone(),
                ProjectGroup {
                    project: Arc::clone(project),
                    items: Vec::new(),
                },
            )
        })
        .collect();

    // One shared cache for the whole call; repeated lookups against the
    // same project set stay O(1).
    let mut cache = RunLookupCache::new(projects);

    for item in items {
        match find_project_for_test_item(item, projects, provider, &mut cache).await {
            Some(owner) => {
                if let Some(group) = groups.get_mut(owner.id()) {
                    group.items.push(Arc::clone(item));
                }
            }
            None => {
                tracing::warn!("Could not match test item `{}` to a project", item.id());
            }
        }
    }

    groups.retain(|_, group| !group.items.is_empty());
    groups
}

fn longest_matching_root(
    path: &SystemPath,
    projects: &[Arc<ProjectAdapter>],
) -> Option<Arc<ProjectAdapter>> {
    let mut best: Option<(usize, &Arc<ProjectAdapter>)> = None;

    for project in projects {
        let root = project.project().root();
        if !contains_path(root, path) {
            continue;
        }
        let root_len = normalized_key(root).len();
        if best.is_none_or(|(best_len, _)| root_len > best_len) {
            best = Some((root_len, project));
        }
    }

    best.map(|(_, project)| Arc::clone(project))
}
