use std::collections::HashMap;
use std::sync::RwLock;

use switchyard_host::CoverageDetail;
use switchyard_project::path::{SystemPath, SystemPathBuf};

/// Per-project mapping between the host UI's test-item id space and the
/// test framework's native run-id space, plus the coverage detail the
/// framework reported per file.
///
/// Owned exclusively by one project. The framework adapters write into it
/// during discovery and execution; the execution coordinator reads it.
#[derive(Default)]
pub struct ResultResolver {
    vs_id_to_run_id: RwLock<HashMap<String, String>>,
    run_id_to_vs_id: RwLock<HashMap<String, String>>,
    detailed_coverage: RwLock<HashMap<SystemPathBuf, Vec<CoverageDetail>>>,
}

impl ResultResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a UI id ↔ run-id pair, replacing any prior mapping for
    /// either id.
    pub fn record_run_id(&self, vs_id: impl Into<String>, run_id: impl Into<String>) {
        let vs_id = vs_id.into();
        let run_id = run_id.into();
        self.vs_id_to_run_id
            .write()
            .unwrap()
            .insert(vs_id.clone(), run_id.clone());
        self.run_id_to_vs_id.write().unwrap().insert(run_id, vs_id);
    }

    #[must_use]
    pub fn run_id_for(&self, vs_id: &str) -> Option<String> {
        self.vs_id_to_run_id.read().unwrap().get(vs_id).cloned()
    }

    #[must_use]
    pub fn vs_id_for(&self, run_id: &str) -> Option<String> {
        self.run_id_to_vs_id.read().unwrap().get(run_id).cloned()
    }

    /// Drops a stale UI id, e.g. after the host rebuilt its test tree.
    pub fn forget(&self, vs_id: &str) {
        if let Some(run_id) = self.vs_id_to_run_id.write().unwrap().remove(vs_id) {
            self.run_id_to_vs_id.write().unwrap().remove(&run_id);
        }
    }

    pub fn record_coverage(&self, file: SystemPathBuf, details: Vec<CoverageDetail>) {
        self.detailed_coverage.write().unwrap().insert(file, details);
    }

    #[must_use]
    pub fn coverage_for(&self, file: &SystemPath) -> Option<Vec<CoverageDetail>> {
        self.detailed_coverage.read().unwrap().get(file).cloned()
    }

    /// Clears all id mappings, keeping coverage intact. Called when the
    /// project's test tree is rebuilt from scratch.
    pub fn clear_run_ids(&self) {
        self.vs_id_to_run_id.write().unwrap().clear();
        self.run_id_to_vs_id.write().unwrap().clear();
    }
}
