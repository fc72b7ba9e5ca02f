/// Per-request timeout. Fixed, not exposed on the command line.
pub const FETCH_TIMEOUT_SECS: u64 = 10;

pub const MAX_CONCURRENCY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub timeout_secs: u64,
    /// Resource fetches in flight at once. 1 means strictly sequential.
    pub concurrency: usize,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: FETCH_TIMEOUT_SECS,
            concurrency: 8,
            user_agent: format!("endpoint-hunter/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Defaults, overridden by `ENDPOINT_HUNTER_CONCURRENCY` and `ENDPOINT_HUNTER_USER_AGENT`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var("ENDPOINT_HUNTER_CONCURRENCY").ok().as_deref(),
            std::env::var("ENDPOINT_HUNTER_USER_AGENT").ok().as_deref(),
        )
    }

    fn with_overrides(mut self, concurrency: Option<&str>, user_agent: Option<&str>) -> Self {
        if let Some(raw) = concurrency {
            match raw.trim().parse::<usize>() {
                Ok(n) => self.concurrency = n.clamp(1, MAX_CONCURRENCY),
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring invalid ENDPOINT_HUNTER_CONCURRENCY"),
            }
        }
        if let Some(ua) = user_agent {
            if ua.trim().is_empty() {
                tracing::warn!("ignoring empty ENDPOINT_HUNTER_USER_AGENT");
            } else {
                self.user_agent = ua.to_string();
            }
        }
        self
    }
}
