pub mod path_extractor;
pub mod resource_urls;

pub use path_extractor::extract_paths;
pub use resource_urls::extract_resource_urls;
