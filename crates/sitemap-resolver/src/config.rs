//! Configuration for resolution and the bundled HTTP fetcher.
//!
//! Configuration is an immutable value handed to the resolver and the
//! fetcher at construction time. It can be built in code or loaded from TOML.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [resolve]
//! include_metadata = true
//! max_depth = 8
//!
//! [http]
//! timeout_secs = 30
//! user_agent = "my-crawler/1.0"
//! max_redirects = 5
//!
//! [http.headers]
//! "Accept-Language" = "en"
//! ```
//!
//! ```rust
//! use sitemap_resolver::Config;
//!
//! let config = Config::from_toml_str("[resolve]\ninclude_metadata = true\n")?;
//! assert!(config.resolve.include_metadata);
//! assert_eq!(config.http.timeout_secs, 30);
//! # Ok::<(), sitemap_resolver::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Options fixed for the lifetime of a resolution call
    pub resolve: ResolveOptions,
    /// Transport settings for [`HttpFetcher`](crate::HttpFetcher)
    pub http: HttpConfig,
}

/// Options that shape a resolution call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Emit `(loc, metadata)` pairs for url-set entries instead of bare locations.
    pub include_metadata: bool,

    /// Maximum nesting of sitemaps below the root.
    ///
    /// `None` (the default) never limits recursion, so a cycle between sitemap
    /// indices produces an endless stream.
    pub max_depth: Option<usize>,
}

impl ResolveOptions {
    /// Options with metadata mode switched on.
    #[must_use]
    pub fn with_metadata() -> Self {
        Self {
            include_metadata: true,
            ..Self::default()
        }
    }

    /// Set the nesting limit.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Settings for the reqwest-backed fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Redirects followed before giving up.
    pub max_redirects: usize,
    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl HttpConfig {
    /// Request timeout as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("sitemap-resolver/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirects: 5,
            headers: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string. Missing fields take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }
}
