use crate::environment::PythonEnvironment;
use crate::path::{SystemPath, SystemPathBuf, normalized_key};
use crate::settings::TestFramework;

/// Stable identity of a project: the canonical form of its root path.
///
/// Two projects in the same workspace never share an id; the registry
/// enforces this at registration time.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ProjectId(String);

impl ProjectId {
    #[must_use]
    pub fn from_root(root: &SystemPath) -> Self {
        Self(normalized_key(root))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A unique (root directory, Python environment) pair within a workspace.
#[derive(Debug, Clone)]
pub struct Project {
    id: ProjectId,
    name: String,
    root: SystemPathBuf,
    workspace_root: SystemPathBuf,
    environment: PythonEnvironment,
    framework: TestFramework,
}

impl Project {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        root: SystemPathBuf,
        workspace_root: SystemPathBuf,
        environment: PythonEnvironment,
        framework: TestFramework,
    ) -> Self {
        Self {
            id: ProjectId::from_root(&root),
            name: name.into(),
            root,
            workspace_root,
            environment,
            framework,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn root(&self) -> &SystemPathBuf {
        &self.root
    }

    #[must_use]
    pub const fn workspace_root(&self) -> &SystemPathBuf {
        &self.workspace_root
    }

    #[must_use]
    pub const fn environment(&self) -> &PythonEnvironment {
        &self.environment
    }

    #[must_use]
    pub const fn framework(&self) -> TestFramework {
        self.framework
    }
}

/// Display name combining the project name with its interpreter version,
/// e.g. `backend (3.12.1)`.
#[must_use]
pub fn project_display_name(name: &str, version: &str) -> String {
    format!("{name} ({version})")
}
