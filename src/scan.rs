//! One-hop endpoint scan: seed page, its direct resources, and the paths quoted in them.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use futures::stream::{self, StreamExt};
use url::Url;

use crate::fetch::{FetchError, Fetcher};
use crate::gather::path_extractor::extract_paths;
use crate::gather::resource_urls::extract_resource_urls;
use crate::output::{write_endpoints, OutputSink};

/// Result of a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Accepted endpoints, sorted and unique.
    pub paths: Vec<String>,
    pub resources_found: usize,
    pub resources_fetched: usize,
    pub resources_skipped: usize,
}

#[derive(Debug)]
pub enum ScanError {
    /// The seed page could not be fetched; nothing was produced.
    Seed { url: String, source: FetchError },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Seed { url, source } => write!(f, "failed to fetch main URL {}: {}", url, source),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Seed { source, .. } => Some(source),
        }
    }
}

/// Endpoints accumulated across fetched bodies. Union only, never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet(BTreeSet<String>);

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract paths from `body` and merge them in. Returns how many were extracted,
    /// duplicates included.
    pub fn absorb(&mut self, body: &str) -> usize {
        let found = extract_paths(body);
        let n = found.len();
        self.0.extend(found);
        n
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Lexicographic (byte order) listing.
    pub fn into_sorted(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

/// Run a scan from `seed`.
///
/// Only a failed seed fetch is an error. Each resource is fetched independently, up to
/// `concurrency` at a time; failures are reported to `sink` and skipped.
pub async fn run_scan(
    seed: &str,
    fetcher: &dyn Fetcher,
    sink: &dyn OutputSink,
    concurrency: usize,
) -> Result<ScanReport, ScanError> {
    sink.status("Fetching main page...");
    let base = match Url::parse(seed) {
        Ok(u) => u,
        Err(e) => {
            let err = FetchError::InvalidUrl(e);
            sink.fetch_failed(seed, &err);
            sink.error("Failed to fetch main URL. Exiting...");
            return Err(ScanError::Seed { url: seed.to_string(), source: err });
        }
    };
    let main_page = match fetcher.fetch(seed).await {
        Ok(page) if page.body.is_empty() => {
            let err = FetchError::EmptyBody;
            tracing::warn!(url = %seed, "seed returned an empty body");
            sink.fetch_failed(seed, &err);
            sink.error("Failed to fetch main URL. Exiting...");
            return Err(ScanError::Seed { url: seed.to_string(), source: err });
        }
        Ok(page) => page,
        Err(err) => {
            tracing::warn!(url = %seed, error = %err, "seed fetch failed");
            sink.fetch_failed(seed, &err);
            sink.error("Failed to fetch main URL. Exiting...");
            return Err(ScanError::Seed { url: seed.to_string(), source: err });
        }
    };
    tracing::info!(url = %main_page.url, bytes = main_page.body.len(), content_type = %main_page.content_type, "fetched main page");

    sink.status("Extracting resource URLs...");
    let resources = extract_resource_urls(&base, &main_page.body);
    sink.success(&format!("Found {} resource URLs to process", resources.len()));
    tracing::info!("{} resource URLs discovered", resources.len());

    let mut paths = PathSet::new();
    sink.status("Processing main page content...");
    let in_main = paths.absorb(&main_page.body);
    sink.success(&format!("Found {} paths in main HTML", in_main));

    let mut report = ScanReport {
        resources_found: resources.len(),
        ..ScanReport::default()
    };

    sink.resources_started(resources.len());
    let mut fetches = stream::iter(resources.into_iter())
        .map(|url| async move {
            let res = fetcher.fetch(&url).await;
            (url, res)
        })
        .buffer_unordered(concurrency.max(1));

    while let Some((url, res)) = fetches.next().await {
        match res {
            Ok(page) => {
                let n = paths.absorb(&page.body);
                report.resources_fetched += 1;
                tracing::debug!(url = %page.url, content_type = %page.content_type, paths = n, "resource processed");
                sink.resource_processed(&url, Some(n));
            }
            Err(err) => {
                report.resources_skipped += 1;
                tracing::warn!(url = %url, error = %err, "skipping resource");
                sink.fetch_failed(&url, &err);
                sink.resource_processed(&url, None);
            }
        }
    }
    sink.resources_finished();

    report.paths = paths.into_sorted();
    tracing::info!(
        endpoints = report.paths.len(),
        fetched = report.resources_fetched,
        skipped = report.resources_skipped,
        "scan complete"
    );
    sink.table(&report.paths);
    Ok(report)
}

/// [`run_scan`], then write the endpoints to `output`.
///
/// The file is only touched after a successful scan, so a failed seed fetch leaves
/// any existing file as it was.
pub async fn scan_and_save(
    seed: &str,
    fetcher: &dyn Fetcher,
    sink: &dyn OutputSink,
    concurrency: usize,
    output: &Path,
) -> anyhow::Result<ScanReport> {
    let report = run_scan(seed, fetcher, sink, concurrency).await?;
    write_endpoints(output, &report.paths)?;
    tracing::info!(path = %output.display(), count = report.paths.len(), "wrote endpoints");
    sink.saved(&report, output);
    Ok(report)
}
