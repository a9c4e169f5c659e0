use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use switchyard_host::{DiscoveredProject, EnvironmentProvider};
use switchyard_project::PythonEnvironment;
use switchyard_project::path::{SystemPath, SystemPathBuf, normalized_key};

/// Scriptable in-memory environment provider.
///
/// Unavailable and empty by default; every `with_*` method makes it more
/// capable. Failure modes are opt-in so tests can drive each degradation
/// path of the registry and router.
#[derive(Default)]
pub struct MockEnvironmentProvider {
    available: bool,
    projects: Vec<DiscoveredProject>,
    environments: HashMap<String, PythonEnvironment>,
    owners: HashMap<String, SystemPathBuf>,
    active: Option<PythonEnvironment>,
    fail_listing: bool,
    fail_owner_lookups: bool,
    owner_queries: Mutex<Vec<SystemPathBuf>>,
    unresolvable: HashSet<String>,
}

impl MockEnvironmentProvider {
    #[must_use]
    pub fn available() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Adds a project with a synthetic resolved environment.
    #[must_use]
    pub fn with_project(mut self, name: &str, root: &str) -> Self {
        let root = SystemPathBuf::from(root);
        self.environments.insert(
            normalized_key(&root),
            PythonEnvironment::new(root.join("bin/python"), "3.12.0", name),
        );
        self.projects.push(DiscoveredProject {
            name: name.to_string(),
            root,
        });
        self
    }

    /// Adds a project whose environment resolution yields nothing.
    #[must_use]
    pub fn with_unresolvable_project(mut self, name: &str, root: &str) -> Self {
        let root = SystemPathBuf::from(root);
        self.unresolvable.insert(normalized_key(&root));
        self.projects.push(DiscoveredProject {
            name: name.to_string(),
            root,
        });
        self
    }

    #[must_use]
    pub fn with_owner(mut self, file: &str, root: &str) -> Self {
        self.owners.insert(
            normalized_key(SystemPath::new(file)),
            SystemPathBuf::from(root),
        );
        self
    }

    #[must_use]
    pub fn with_active_environment(mut self, environment: PythonEnvironment) -> Self {
        self.active = Some(environment);
        self
    }

    #[must_use]
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    #[must_use]
    pub fn failing_owner_lookups(mut self) -> Self {
        self.fail_owner_lookups = true;
        self
    }

    /// The file paths `owner_project_of` was asked about, in order.
    #[must_use]
    pub fn owner_queries(&self) -> Vec<SystemPathBuf> {
        self.owner_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnvironmentProvider for MockEnvironmentProvider {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn list_projects(&self) -> Result<Vec<DiscoveredProject>> {
        if self.fail_listing {
            return Err(anyhow!("environment manager crashed"));
        }
        Ok(self.projects.clone())
    }

    async fn resolve_environment(&self, root: &SystemPath) -> Result<Option<PythonEnvironment>> {
        let key = normalized_key(root);
        if self.unresolvable.contains(&key) {
            return Ok(None);
        }
        Ok(self.environments.get(&key).cloned())
    }

    async fn owner_project_of(&self, path: &SystemPath) -> Result<Option<SystemPathBuf>> {
        self.owner_queries.lock().unwrap().push(path.to_path_buf());
        if self.fail_owner_lookups {
            return Err(anyhow!("owner lookup failed"));
        }
        Ok(self.owners.get(&normalized_key(path)).cloned())
    }

    async fn active_environment(&self, _workspace: &SystemPath) -> Option<PythonEnvironment> {
        self.active.clone()
    }
}
