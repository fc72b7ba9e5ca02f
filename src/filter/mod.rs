pub mod path_validator;

pub use path_validator::is_valid_path;
