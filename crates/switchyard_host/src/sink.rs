use switchyard_project::path::SystemPath;

use crate::item::TestItem;
use crate::run::CoverageDetail;

/// Resolves per-file coverage detail on demand for the host UI.
///
/// Installed once per coverage run by the execution coordinator; shared
/// across every project in the run so the UI does not need to know which
/// project produced which file.
pub type CoverageLoader = Box<dyn Fn(&SystemPath) -> Vec<CoverageDetail> + Send + Sync>;

/// The host's test-run object: an append-only event sink for test state.
///
/// Multiple projects report into one sink concurrently, so implementations
/// must tolerate interleaved calls from concurrent writers.
pub trait TestRunSink: Send + Sync {
    fn started(&self, item: &TestItem);

    fn passed(&self, item: &TestItem);

    fn failed(&self, item: &TestItem, message: &str);

    fn skipped(&self, item: &TestItem);

    /// Populates the detailed-coverage callback slot on the run profile.
    fn set_coverage_loader(&self, loader: CoverageLoader);
}
