use crate::path::SystemPathBuf;

/// A resolved Python execution environment bound to one project.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PythonEnvironment {
    executable: SystemPathBuf,
    version: String,
    display_name: String,
}

impl PythonEnvironment {
    #[must_use]
    pub fn new(
        executable: impl Into<SystemPathBuf>,
        version: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            executable: executable.into(),
            version: version.into(),
            display_name: display_name.into(),
        }
    }

    /// The environment used when no interpreter can be resolved at all.
    /// Relies on `python` being reachable through `PATH`.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new("python", "3.x", "Python")
    }

    #[must_use]
    pub const fn executable(&self) -> &SystemPathBuf {
        &self.executable
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
