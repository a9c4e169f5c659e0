use std::sync::{Arc, RwLock};

use switchyard_host::{DiscoveryAdapter, ExecutionAdapter};
use switchyard_project::path::SystemPathBuf;
use switchyard_project::{Project, ProjectId};

use crate::resolver::ResultResolver;

/// Binds a [`Project`] to its isolated test infrastructure: the result
/// resolver, the framework discovery/execution adapter pair, and the list
/// of nested child-project roots to exclude from discovery and execution.
///
/// This is a data entity; the registry creates one per project and the
/// router/coordinator consume it read-only. The ignore list is the only
/// field written after construction (once all projects of a workspace are
/// known).
pub struct ProjectAdapter {
    project: Project,
    resolver: ResultResolver,
    discovery: Arc<dyn DiscoveryAdapter>,
    execution: Arc<dyn ExecutionAdapter>,
    nested_ignores: RwLock<Vec<SystemPathBuf>>,
}

impl ProjectAdapter {
    #[must_use]
    pub fn new(
        project: Project,
        discovery: Arc<dyn DiscoveryAdapter>,
        execution: Arc<dyn ExecutionAdapter>,
    ) -> Self {
        Self {
            project,
            resolver: ResultResolver::new(),
            discovery,
            execution,
            nested_ignores: RwLock::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        self.project.id()
    }

    #[must_use]
    pub const fn resolver(&self) -> &ResultResolver {
        &self.resolver
    }

    #[must_use]
    pub fn discovery_adapter(&self) -> Arc<dyn DiscoveryAdapter> {
        Arc::clone(&self.discovery)
    }

    #[must_use]
    pub fn execution_adapter(&self) -> Arc<dyn ExecutionAdapter> {
        Arc::clone(&self.execution)
    }

    /// Roots of nested child projects this project must not discover or
    /// run tests under.
    #[must_use]
    pub fn nested_ignores(&self) -> Vec<SystemPathBuf> {
        self.nested_ignores.read().unwrap().clone()
    }

    pub fn set_nested_ignores(&self, ignores: Vec<SystemPathBuf>) {
        *self.nested_ignores.write().unwrap() = ignores;
    }
}

impl std::fmt::Debug for ProjectAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectAdapter")
            .field("project", &self.project)
            .field("nested_ignores", &self.nested_ignores.read().unwrap())
            .finish_non_exhaustive()
    }
}
