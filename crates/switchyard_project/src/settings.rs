/// The test framework a project's tests are discovered and run with.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum TestFramework {
    #[default]
    Pytest,
    Unittest,
}

impl TestFramework {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pytest => "pytest",
            Self::Unittest => "unittest",
        }
    }
}

impl std::fmt::Display for TestFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-workspace testing configuration as read from the host editor.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSettings {
    pub unittest_enabled: bool,
}

impl WorkspaceSettings {
    /// Unittest wins only when explicitly enabled; pytest is the default.
    #[must_use]
    pub const fn framework(&self) -> TestFramework {
        if self.unittest_enabled {
            TestFramework::Unittest
        } else {
            TestFramework::Pytest
        }
    }
}
