//! Terminal rendering: banner, spinners, resource progress bar and the endpoint table.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;

use super::OutputSink;
use crate::fetch::FetchError;
use crate::scan::ScanReport;

const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[1;34m";
const MAGENTA: &str = "\x1b[1;35m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

pub const TABLE_TITLE: &str = "Extracted Endpoints";
const TABLE_HEADER: &str = "Endpoint";

#[derive(Default)]
pub struct ConsoleSink {
    spinner: Mutex<Option<ProgressBar>>,
    progress: Mutex<Option<ProgressBar>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner(&self, target: &str, output: &str) {
        let lines = [
            format!("{BLUE}Endpoint Hunter - Endpoint Extractor{RESET}"),
            format!("{YELLOW}v{}{RESET}", env!("CARGO_PKG_VERSION")),
            format!("{GREEN}For educational purposes only{RESET}"),
        ];
        let width = 40;
        println!("{MAGENTA}╭{}╮{RESET}", "─".repeat(width));
        for l in &lines {
            let visible = strip_ansi(l).chars().count();
            println!("{MAGENTA}│{RESET} {}{} {MAGENTA}│{RESET}", l, " ".repeat(width.saturating_sub(visible + 2)));
        }
        println!("{MAGENTA}╰{}╯{RESET}", "─".repeat(width));
        println!("{BOLD}Target URL:{RESET} {CYAN}{}{RESET}", target);
        println!("{BOLD}Output File:{RESET} {CYAN}{}{RESET}", output);
        println!();
    }

    fn clear_spinner(&self) {
        if let Some(sp) = self.spinner.lock().take() {
            sp.finish_and_clear();
        }
    }

    /// Print above the progress bar when one is active so the bar is not torn.
    fn line(&self, msg: String) {
        match self.progress.lock().as_ref() {
            Some(pb) => pb.println(msg),
            None => println!("{}", msg),
        }
    }
}

impl OutputSink for ConsoleSink {
    fn status(&self, msg: &str) {
        self.clear_spinner();
        let sp = ProgressBar::new_spinner();
        sp.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        sp.set_message(format!("{BOLD}{GREEN}{}{RESET}", msg));
        sp.enable_steady_tick(Duration::from_millis(80));
        *self.spinner.lock() = Some(sp);
    }

    fn success(&self, msg: &str) {
        self.clear_spinner();
        self.line(format!("{GREEN}{}{RESET}", msg));
    }

    fn fetch_failed(&self, url: &str, err: &FetchError) {
        self.clear_spinner();
        let msg = match err {
            FetchError::NonText(_) => format!("{YELLOW}Skipping non-text content at {}{RESET}", url),
            FetchError::Status(code) => format!("{RED}Failed to fetch {}: Status code {}{RESET}", url, code),
            other => format!("{RED}Error fetching {}: {}{RESET}", url, other),
        };
        self.line(msg);
    }

    fn resources_started(&self, total: usize) {
        self.clear_spinner();
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Processing resource URLs...");
        *self.progress.lock() = Some(pb);
    }

    fn resource_processed(&self, url: &str, found: Option<usize>) {
        let guard = self.progress.lock();
        if let Some(pb) = guard.as_ref() {
            pb.inc(1);
            pb.set_message(format!("Processing: {}", url));
            if let Some(n) = found {
                pb.println(format!("{YELLOW}Found {} paths in {}{RESET}", n, url));
            }
        }
    }

    fn resources_finished(&self) {
        if let Some(pb) = self.progress.lock().take() {
            pb.finish_and_clear();
        }
    }

    fn error(&self, msg: &str) {
        self.clear_spinner();
        eprintln!("{RED}{}{RESET}", msg);
    }

    fn table(&self, paths: &[String]) {
        self.clear_spinner();
        println!();
        println!("{}", render_table(paths));
    }

    fn saved(&self, report: &ScanReport, output: &Path) {
        println!(
            "Resources: {} found, {} fetched, {} skipped",
            report.resources_found, report.resources_fetched, report.resources_skipped
        );
        println!("{BOLD}{GREEN}Saved {} unique endpoints to {}{RESET}", report.paths.len(), output.display());
    }
}

/// Boxed single-column table, plain text so it can be tested and logged.
pub fn render_table(paths: &[String]) -> String {
    let width = paths
        .iter()
        .map(|p| p.len())
        .chain([TABLE_TITLE.len(), TABLE_HEADER.len()])
        .max()
        .unwrap_or(0);

    let rule = "─".repeat(width + 2);
    let mut out = String::new();
    out.push_str(&format!("{:^w$}\n", TABLE_TITLE, w = width + 4));
    out.push_str(&format!("┌{}┐\n", rule));
    out.push_str(&format!("│ {:<w$} │\n", TABLE_HEADER, w = width));
    out.push_str(&format!("├{}┤\n", rule));
    for p in paths {
        out.push_str(&format!("│ {:<w$} │\n", p, w = width));
    }
    out.push_str(&format!("└{}┘", rule));
    out
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
