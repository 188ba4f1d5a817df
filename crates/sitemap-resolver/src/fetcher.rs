//! Content fetching for the resolver.
//!
//! The resolver talks to the network only through the [`Fetcher`] trait, so
//! callers can plug in their own transport (custom TLS, proxies, caching) or a
//! fixture in tests. [`HttpFetcher`] is the bundled reqwest implementation.
//!
//! Implementors report the raw status; the resolver decides what counts as a
//! success (see [`ensure_success`]).

use crate::config::HttpConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, instrument};
use url::Url;

/// Raw outcome of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, when the server sent one.
    pub content_type: Option<String>,
    /// Response body, possibly still gzip-compressed.
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// A `200 OK` response with the given body and no content type.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: None,
            body: body.into(),
        }
    }

    /// Attach a content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Capability to retrieve a URL.
///
/// Transport-level failures must be reported as [`Error::Transport`]. Status
/// codes are returned as-is, without being turned into errors.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return its status, content type and body.
    async fn fetch(&self, url: &Url) -> Result<FetchResponse>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for &F {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
        (**self).fetch(url).await
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
        (**self).fetch(url).await
    }
}

/// Validate a source URL before anything is fetched.
///
/// The string must parse as an absolute URL with a host.
///
/// ```rust
/// use sitemap_resolver::fetcher::parse_source_url;
///
/// assert!(parse_source_url("https://example.com/sitemap.xml").is_ok());
/// assert!(parse_source_url("not a url").is_err());
/// assert!(parse_source_url("mailto:someone@example.com").is_err());
/// ```
pub fn parse_source_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
    if !url.has_host() {
        return Err(Error::InvalidUrl(format!("{raw}: missing host")));
    }
    Ok(url)
}

/// Accept statuses in `200..400`; anything else is [`Error::BadStatus`].
pub fn ensure_success(url: &Url, status: u16) -> Result<()> {
    if (200..400).contains(&status) {
        Ok(())
    } else {
        Err(Error::BadStatus {
            url: url.to_string(),
            status,
        })
    }
}

/// reqwest-backed [`Fetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the default [`HttpConfig`].
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a fetcher with a custom timeout, user agent, redirect limit
    /// and extra headers.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .default_headers(build_headers(config)?)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

fn build_headers(config: &HttpConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Config(format!("Invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Config(format!("Invalid value for header '{name}': {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
        let transport = |e: reqwest::Error| Error::Transport {
            url: url.to_string(),
            source: Box::new(e),
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(std::string::ToString::to_string);
        let body = response.bytes().await.map_err(transport)?.to_vec();

        debug!(status, bytes = body.len(), "Fetched");

        Ok(FetchResponse {
            status,
            content_type,
            body,
        })
    }
}
