use anyhow::Result;
use async_trait::async_trait;

use switchyard_project::path::{SystemPath, SystemPathBuf};
use switchyard_project::{PythonEnvironment, WorkspaceSettings};

/// A Python project as reported by the environment manager, before this
/// engine has resolved an interpreter for it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiscoveredProject {
    pub name: String,
    pub root: SystemPathBuf,
}

/// Capability contract with the external Python environment manager.
///
/// Injected once at startup: callers hold a real client when the manager
/// is present and [`NullEnvironmentProvider`] when it is not, instead of
/// probing for the capability at every call site.
#[async_trait]
pub trait EnvironmentProvider: Send + Sync {
    /// Whether the environment manager is present at all. When `false`,
    /// discovery degrades to a single fallback project per workspace.
    fn is_available(&self) -> bool;

    /// All Python projects known to the manager, system-wide.
    async fn list_projects(&self) -> Result<Vec<DiscoveredProject>>;

    /// Resolves the Python environment for a project root, if any.
    async fn resolve_environment(&self, root: &SystemPath) -> Result<Option<PythonEnvironment>>;

    /// The root of the project that owns `path`, if the manager knows one.
    async fn owner_project_of(&self, path: &SystemPath) -> Result<Option<SystemPathBuf>>;

    /// The interpreter active for a workspace, used by the fallback
    /// project when no per-project environment exists.
    async fn active_environment(&self, workspace: &SystemPath) -> Option<PythonEnvironment>;
}

/// The capability-off implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEnvironmentProvider;

#[async_trait]
impl EnvironmentProvider for NullEnvironmentProvider {
    fn is_available(&self) -> bool {
        false
    }

    async fn list_projects(&self) -> Result<Vec<DiscoveredProject>> {
        Ok(Vec::new())
    }

    async fn resolve_environment(&self, _root: &SystemPath) -> Result<Option<PythonEnvironment>> {
        Ok(None)
    }

    async fn owner_project_of(&self, _path: &SystemPath) -> Result<Option<SystemPathBuf>> {
        Ok(None)
    }

    async fn active_environment(&self, _workspace: &SystemPath) -> Option<PythonEnvironment> {
        None
    }
}

/// Reads the host editor's per-workspace testing configuration.
pub trait SettingsProvider: Send + Sync {
    fn settings(&self, workspace: &SystemPath) -> WorkspaceSettings;
}

/// Fixed settings for every workspace; the default reads as
/// "pytest everywhere".
#[derive(Debug, Default, Clone)]
pub struct StaticSettings(pub WorkspaceSettings);

impl SettingsProvider for StaticSettings {
    fn settings(&self, _workspace: &SystemPath) -> WorkspaceSettings {
        self.0.clone()
    }
}
