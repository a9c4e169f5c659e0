use std::collections::HashMap;
use std::sync::Arc;

use switchyard_project::ProjectId;
use switchyard_project::path::{SystemPath, normalized_key};
use switchyard_registry::ProjectAdapter;

/// Run-scoped lookup cache for one grouping call.
///
/// Holds a root-path index built once from the run's project set and a
/// memo of every path already resolved, including negative results.
/// Never outlives the grouping call that created it.
pub struct RunLookupCache {
    adapters_by_id: HashMap<ProjectId, Arc<ProjectAdapter>>,
    roots: HashMap<String, ProjectId>,
    by_path: HashMap<String, Option<ProjectId>>,
}

impl RunLookupCache {
    #[must_use]
    pub fn new(projects: &[Arc<ProjectAdapter>]) -> Self {
        let mut adapters_by_id = HashMap::with_capacity(projects.len());
        let mut roots = HashMap::with_capacity(projects.len());

        for project in projects {
            adapters_by_id.insert(project.id().clone(), Arc::clone(project));
            roots.insert(
                normalized_key(project.project().root()),
                project.id().clone(),
            );
        }

        Self {
            adapters_by_id,
            roots,
            by_path: HashMap::new(),
        }
    }

    /// The project registered exactly at `root`, if any.
    #[must_use]
    pub fn project_at_root(&self, root: &SystemPath) -> Option<Arc<ProjectAdapter>> {
        self.roots
            .get(&normalized_key(root))
            .and_then(|id| self.adapter(id))
    }

    /// Outer `None` = never resolved; `Some(None)` = resolved to no owner.
    #[must_use]
    pub fn lookup(&self, path: &SystemPath) -> Option<Option<Arc<ProjectAdapter>>> {
        self.by_path
            .get(&normalized_key(path))
            .map(|cached| cached.as_ref().and_then(|id| self.adapter(id)))
    }

    pub fn insert(&mut self, path: &SystemPath, owner: Option<&ProjectId>) {
        self.by_path.insert(normalized_key(path), owner.cloned());
    }

    fn adapter(&self, id: &ProjectId) -> Option<Arc<ProjectAdapter>> {
        self.adapters_by_id.get(id).map(Arc::clone)
    }
}
