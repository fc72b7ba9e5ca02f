pub mod console;
pub mod writer_txt;

pub use console::ConsoleSink;
pub use writer_txt::write_endpoints;

use std::path::Path;

use crate::fetch::FetchError;
use crate::scan::ScanReport;

/// Where a scan reports its progress. Passed explicitly to [`crate::scan::run_scan`].
///
/// Methods take `&self` because resource fetches may complete concurrently.
pub trait OutputSink: Send + Sync {
    /// Transient status for the phase currently running.
    fn status(&self, msg: &str);

    /// Persistent progress line, e.g. a count found in a phase.
    fn success(&self, msg: &str);

    /// A fetch failed or was skipped. Called for the seed and for every resource.
    fn fetch_failed(&self, url: &str, err: &FetchError);

    fn resources_started(&self, total: usize);

    /// One resource is done. `found` is `None` when the fetch failed.
    fn resource_processed(&self, url: &str, found: Option<usize>);

    fn resources_finished(&self);

    fn error(&self, msg: &str);

    /// Final listing of the sorted endpoints.
    fn table(&self, paths: &[String]);

    /// Closing summary once the endpoints have been written to `output`.
    fn saved(&self, report: &ScanReport, output: &Path);
}
