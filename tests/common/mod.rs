#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use endpoint_hunter::fetch::{is_text_like, FetchError, FetchedPage, Fetcher};
use endpoint_hunter::output::OutputSink;
use endpoint_hunter::scan::ScanReport;
use parking_lot::Mutex;

/// Canned response for one URL.
pub enum Canned {
    Page { status: u16, content_type: &'static str, body: String },
    Timeout,
}

/// In-memory fetcher applying the same status and content type rules as the HTTP one.
#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, Canned>,
    pub calls: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, content_type: &'static str, body: &str) -> Self {
        self.pages.insert(url.to_string(), Canned::Page { status: 200, content_type, body: body.to_string() });
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Canned::Page { status, content_type: "text/html", body: String::new() });
        self
    }

    pub fn timeout(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), Canned::Timeout);
        self
    }
}

#[async_trait]
impl Fetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.calls.lock().push(url.to_string());
        match self.pages.get(url) {
            None => Err(FetchError::Status(404)),
            Some(Canned::Timeout) => Err(FetchError::Timeout),
            Some(Canned::Page { status, content_type, body }) => {
                if *status != 200 {
                    return Err(FetchError::Status(*status));
                }
                if !is_text_like(content_type) {
                    return Err(FetchError::NonText(content_type.to_string()));
                }
                Ok(FetchedPage { url: url.to_string(), content_type: content_type.to_string(), body: body.clone() })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Status(String),
    Success(String),
    FetchFailed(String, String),
    ResourcesStarted(usize),
    ResourceProcessed(String, Option<usize>),
    ResourcesFinished,
    Error(String),
    Table(Vec<String>),
    Saved(usize, String),
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn failed_urls(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::FetchFailed(url, _) => Some(url),
                _ => None,
            })
            .collect()
    }
}

impl OutputSink for RecordingSink {
    fn status(&self, msg: &str) {
        self.events.lock().push(Event::Status(msg.to_string()));
    }

    fn success(&self, msg: &str) {
        self.events.lock().push(Event::Success(msg.to_string()));
    }

    fn fetch_failed(&self, url: &str, err: &FetchError) {
        self.events.lock().push(Event::FetchFailed(url.to_string(), err.to_string()));
    }

    fn resources_started(&self, total: usize) {
        self.events.lock().push(Event::ResourcesStarted(total));
    }

    fn resource_processed(&self, url: &str, found: Option<usize>) {
        self.events.lock().push(Event::ResourceProcessed(url.to_string(), found));
    }

    fn resources_finished(&self) {
        self.events.lock().push(Event::ResourcesFinished);
    }

    fn error(&self, msg: &str) {
        self.events.lock().push(Event::Error(msg.to_string()));
    }

    fn table(&self, paths: &[String]) {
        self.events.lock().push(Event::Table(paths.to_vec()));
    }

    fn saved(&self, report: &ScanReport, output: &Path) {
        self.events.lock().push(Event::Saved(report.paths.len(), output.display().to_string()));
    }
}
