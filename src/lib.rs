pub mod config;
pub mod fetch;
pub mod filter;
pub mod gather;
pub mod http_client;
pub mod output;
pub mod scan;

pub use crate::filter::is_valid_path;
pub use crate::gather::{extract_paths, extract_resource_urls};
pub use crate::scan::{run_scan, scan_and_save, ScanError, ScanReport};
