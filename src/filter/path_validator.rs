/// Prefixes a candidate must start with to count as a path.
pub const PATH_PREFIXES: [&str; 3] = ["/", "./", "../"];

/// Candidates at or above this length are rejected.
pub const MAX_PATH_LEN: usize = 200;

/// Returns true if `path` looks like an endpoint worth reporting.
///
/// Rejects anything not anchored at `/`, `./` or `../`, anything containing a space,
/// anything outside printable ASCII (0x20..=0x7E) and anything 200 characters or longer.
/// No normalization happens first.
pub fn is_valid_path(path: &str) -> bool {
    if !has_path_prefix(path) {
        return false;
    }
    if path.contains(' ') {
        return false;
    }
    if !path.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        return false;
    }
    // all bytes are ASCII past this point, so byte length == character count
    !path.is_empty() && path.len() < MAX_PATH_LEN
}

pub fn has_path_prefix(s: &str) -> bool {
    PATH_PREFIXES.iter().any(|p| s.starts_with(p))
}
