//! Single-attempt page fetching.
//!
//! [`Fetcher`] is the seam between the scan pipeline and the network. [`HttpFetcher`]
//! is the reqwest-backed implementation; tests plug in their own.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::config::Config;
use crate::http_client;

/// Content type substrings that mark a response as text worth scanning.
pub const TEXT_LIKE_MARKERS: [&str; 3] = ["text", "javascript", "css"];

/// Returns true if the declared content type looks like text.
///
/// Plain substring match, case sensitive, so `application/javascript+foo` passes too.
pub fn is_text_like(content_type: &str) -> bool {
    TEXT_LIKE_MARKERS.iter().any(|m| content_type.contains(m))
}

/// A successfully fetched text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub content_type: String,
    pub body: String,
}

#[derive(Debug)]
pub enum FetchError {
    /// The URL could not be parsed.
    InvalidUrl(url::ParseError),
    /// Response status was anything other than 200.
    Status(u16),
    /// Response was not text-like; holds the declared content type.
    NonText(String),
    /// 200 with a text content type but nothing in the body.
    EmptyBody,
    /// No response within the configured timeout.
    Timeout,
    /// Connection, TLS, protocol or body decoding failure.
    Transport(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl(e) => write!(f, "invalid URL: {}", e),
            FetchError::Status(code) => write!(f, "Status code {}", code),
            FetchError::NonText(ct) if ct.is_empty() => write!(f, "non-text content (no content type)"),
            FetchError::NonText(ct) => write!(f, "non-text content ({})", ct),
            FetchError::EmptyBody => write!(f, "empty body"),
            FetchError::Timeout => write!(f, "timed out"),
            FetchError::Transport(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::InvalidUrl(e) => Some(e),
            FetchError::Transport(e) => Some(e),
            FetchError::Status(_) | FetchError::NonText(_) | FetchError::EmptyBody | FetchError::Timeout => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(e)
        }
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` once. Only 200 responses with a text-like content type succeed.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client::create_client(config)?,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = url::Url::parse(url).map_err(FetchError::InvalidUrl)?;

        match tokio::time::timeout(self.timeout, self.fetch_once(url, parsed)).await {
            Ok(res) => res,
            Err(_) => Err(FetchError::Timeout),
        }
    }
}

impl HttpFetcher {
    async fn fetch_once(&self, url: &str, parsed: url::Url) -> Result<FetchedPage, FetchError> {
        let resp = self.client.get(parsed).send().await?;
        if resp.status() != StatusCode::OK {
            return Err(FetchError::Status(resp.status().as_u16()));
        }
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !is_text_like(&content_type) {
            return Err(FetchError::NonText(content_type));
        }
        let body = resp.text().await?;
        Ok(FetchedPage { url: url.to_string(), content_type, body })
    }
}
