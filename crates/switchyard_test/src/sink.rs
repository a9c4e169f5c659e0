use std::sync::Mutex;

use switchyard_host::{CoverageDetail, CoverageLoader, TestItem, TestRunSink};
use switchyard_project::path::SystemPath;

/// Test-run sink that records every event it receives.
#[derive(Default)]
pub struct RecordingSink {
    started: Mutex<Vec<String>>,
    passed: Mutex<Vec<String>>,
    failed: Mutex<Vec<(String, String)>>,
    skipped: Mutex<Vec<String>>,
    coverage_loader: Mutex<Option<CoverageLoader>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn started_ids(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    #[must_use]
    pub fn passed_ids(&self) -> Vec<String> {
        self.passed.lock().unwrap().clone()
    }

    #[must_use]
    pub fn failed_ids(&self) -> Vec<(String, String)> {
        self.failed.lock().unwrap().clone()
    }

    #[must_use]
    pub fn skipped_ids(&self) -> Vec<String> {
        self.skipped.lock().unwrap().clone()
    }

    #[must_use]
    pub fn has_coverage_loader(&self) -> bool {
        self.coverage_loader.lock().unwrap().is_some()
    }

    /// Invokes the installed coverage loader, as the host UI would.
    #[must_use]
    pub fn load_coverage(&self, file: &SystemPath) -> Option<Vec<CoverageDetail>> {
        self.coverage_loader
            .lock()
            .unwrap()
            .as_ref()
            .map(|loader| loader(file))
    }
}

impl TestRunSink for RecordingSink {
    fn started(&self, item: &TestItem) {
        self.started.lock().unwrap().push(item.id().to_string());
    }

    fn passed(&self, item: &TestItem) {
        self.passed.lock().unwrap().push(item.id().to_string());
    }

    fn failed(&self, item: &TestItem, message: &str) {
        self.failed
            .lock()
            .unwrap()
            .push((item.id().to_string(), message.to_string()));
    }

    fn skipped(&self, item: &TestItem) {
        self.skipped.lock().unwrap().push(item.id().to_string());
    }

    fn set_coverage_loader(&self, loader: CoverageLoader) {
        *self.coverage_loader.lock().unwrap() = Some(loader);
    }
}
