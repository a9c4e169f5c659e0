use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use switchyard_host::{AdapterFactory, DiscoveredProject, EnvironmentProvider, SettingsProvider};
use switchyard_project::path::{
    SystemPath, SystemPathBuf, contains_path, is_parent_path, normalized_key,
};
use switchyard_project::{Project, PythonEnvironment, project_display_name};

use crate::adapter::ProjectAdapter;

/// Why a discovered project could not be registered.
#[derive(Debug, Error)]
pub enum ProjectResolutionError {
    #[error("no Python environment resolved for `{root}`")]
    NoEnvironment { root: SystemPathBuf },
    #[error("environment provider failed for `{root}`: {source}")]
    Provider {
        root: SystemPathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// Registry of Python test projects, keyed per workspace.
///
/// Discovers projects through the injected environment provider, falls
/// back to a single default project when the provider is unavailable or
/// yields nothing usable, and computes the nested-project ignore lists
/// once a workspace's projects are all registered.
///
/// One instance is constructed at startup and threaded through the router
/// and coordinator explicitly.
pub struct ProjectRegistry {
    provider: Arc<dyn EnvironmentProvider>,
    settings: Arc<dyn SettingsProvider>,
    adapters: Arc<dyn AdapterFactory>,
    workspaces: HashMap<String, Vec<Arc<ProjectAdapter>>>,
}

impl ProjectRegistry {
    #[must_use]
    pub fn new(
        provider: Arc<dyn EnvironmentProvider>,
        settings: Arc<dyn SettingsProvider>,
        adapters: Arc<dyn AdapterFactory>,
    ) -> Self {
        Self {
            provider,
            settings,
            adapters,
            workspaces: HashMap::new(),
        }
    }

    #[must_use]
    pub fn has_projects(&self, workspace: &SystemPath) -> bool {
        self.workspaces
            .contains_key(&normalized_key(workspace))
    }

    #[must_use]
    pub fn get_workspace_projects(&self, workspace: &SystemPath) -> Option<&[Arc<ProjectAdapter>]> {
        self.workspaces
            .get(&normalized_key(workspace))
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn get_projects_array(&self, workspace: &SystemPath) -> Vec<Arc<ProjectAdapter>> {
        self.get_workspace_projects(workspace)
            .map(<[_]>::to_vec)
            .unwrap_or_default()
    }

    /// Removes all projects of `workspace`, leaving other workspaces
    /// untouched.
    pub fn clear_workspace(&mut self, workspace: &SystemPath) {
        self.workspaces
            .remove(&normalized_key(workspace));
    }

    /// Discovers all Python projects of a workspace and registers them,
    /// replacing any prior registration for that workspace.
    ///
    /// Never fails: provider errors, empty results, and per-project
    /// resolution failures all degrade to a single default project rooted
    /// at the workspace.
    pub async fn discover_and_register_projects(
        &mut self,
        workspace: &SystemPath,
    ) -> Vec<Arc<ProjectAdapter>> {
        tracing::info!("Discovering projects for workspace `{workspace}`");

        let mut registered: Vec<Arc<ProjectAdapter>> = Vec::new();
        for adapter in self.discover_projects(workspace).await {
            if registered.iter().any(|existing| existing.id() == adapter.id()) {
                tracing::warn!(
                    "Ignoring duplicate project root `{}`",
                    adapter.project().root()
                );
                continue;
            }
            registered.push(adapter);
        }

        tracing::info!(
            "Registered {} project(s) for `{workspace}`",
            registered.len()
        );
        self.workspaces.insert(
            normalized_key(workspace),
            registered.clone(),
        );
        registered
    }

    /// Appends each nested child project's root to its parent's ignore
    /// list. Pairwise O(n²) over the workspace's projects; call only
    /// after [`Self::discover_and_register_projects`].
    pub fn configure_nested_project_ignores(&self, workspace: &SystemPath) {
        let projects = self.get_projects_array(workspace);

        for parent in &projects {
            let mut nested: Vec<SystemPathBuf> = Vec::new();
            for child in &projects {
                if parent.id() == child.id() {
                    continue;
                }
                if is_parent_path(parent.project().root(), child.project().root()) {
                    tracing::info!(
                        "Nested: `{}` is inside `{}`",
                        child.project().name(),
                        parent.project().name()
                    );
                    nested.push(child.project().root().clone());
                }
            }
            if !nested.is_empty() {
                parent.set_nested_ignores(nested);
            }
        }
    }

    /// Registers every workspace in turn and wires up nested-project
    /// ignores. Failures stay contained per workspace by construction.
    pub async fn activate(&mut self, workspaces: &[SystemPathBuf]) {
        for workspace in workspaces {
            self.discover_and_register_projects(workspace).await;
            self.configure_nested_project_ignores(workspace);
        }
    }

    async fn discover_projects(&self, workspace: &SystemPath) -> Vec<Arc<ProjectAdapter>> {
        if !self.provider.is_available() {
            tracing::info!("Environment provider unavailable, using default project");
            return vec![self.default_project(workspace).await];
        }

        let all_projects = match self.provider.list_projects().await {
            Ok(projects) => projects,
            Err(error) => {
                tracing::error!("Project discovery failed, using default project: {error:#}");
                return vec![self.default_project(workspace).await];
            }
        };
        tracing::debug!("Provider reported {} project(s) system-wide", all_projects.len());

        let workspace_projects: Vec<DiscoveredProject> = all_projects
            .into_iter()
            .filter(|candidate| contains_path(workspace, &candidate.root))
            .collect();

        if workspace_projects.is_empty() {
            tracing::info!("No projects found in `{workspace}`, using default project");
            return vec![self.default_project(workspace).await];
        }

        let mut adapters = Vec::with_capacity(workspace_projects.len());
        for candidate in workspace_projects {
            match self.create_project_adapter(candidate, workspace).await {
                Ok(adapter) => adapters.push(Arc::new(adapter)),
                Err(error) => tracing::error!("Skipping project: {error}"),
            }
        }

        if adapters.is_empty() {
            tracing::info!("All project environments failed to resolve, using default project");
            return vec![self.default_project(workspace).await];
        }

        adapters
    }

    async fn create_project_adapter(
        &self,
        discovered: DiscoveredProject,
        workspace: &SystemPath,
    ) -> Result<ProjectAdapter, ProjectResolutionError> {
        let environment = self
            .provider
            .resolve_environment(&discovered.root)
            .await
            .map_err(|source| ProjectResolutionError::Provider {
                root: discovered.root.clone(),
                source,
            })?
            .ok_or_else(|| ProjectResolutionError::NoEnvironment {
                root: discovered.root.clone(),
            })?;

        let framework = self.settings.settings(workspace).framework();
        let name = project_display_name(&discovered.name, environment.version());
        let project = Project::new(
            name,
            discovered.root,
            workspace.to_path_buf(),
            environment,
            framework,
        );

        let (discovery, execution) = self.adapters.create_adapters(framework);
        Ok(ProjectAdapter::new(project, discovery, execution))
    }

    /// The single project used when no provider-backed project is usable:
    /// rooted at the workspace, running on the active interpreter (or a
    /// placeholder when there is none).
    async fn default_project(&self, workspace: &SystemPath) -> Arc<ProjectAdapter> {
        let environment = self
            .provider
            .active_environment(workspace)
            .await
            .unwrap_or_else(PythonEnvironment::placeholder);
        let framework = self.settings.settings(workspace).framework();
        let name = workspace.file_name().unwrap_or("workspace").to_string();

        let project = Project::new(
            name,
            workspace.to_path_buf(),
            workspace.to_path_buf(),
            environment,
            framework,
        );
        let (discovery, execution) = self.adapters.create_adapters(framework);
        Arc::new(ProjectAdapter::new(project, discovery, execution))
    }
}

impl std::fmt::Debug for ProjectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectRegistry")
            .field("workspaces", &self.workspaces)
            .finish_non_exhaustive()
    }
}
