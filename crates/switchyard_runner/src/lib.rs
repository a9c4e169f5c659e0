//! Parallel execution coordinator: fans one test-run request out across
//! its owning projects, isolating failures and cancellation per project,
//! and correlates parallel debug sessions with their termination events.

mod debug;
mod execution;

pub use debug::SessionDebugLauncher;
pub use execution::{ExecutionDependencies, execute_tests_for_projects, test_case_nodes};
