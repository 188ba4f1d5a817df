//! Error types and handling for sitemap resolution.
//!
//! Every failure aborts the resolution that produced it. A failure inside a
//! nested sitemap ends the whole outer stream; there is no per-child
//! isolation and the resolver never retries on its own.
//!
//! ## Error Categories
//!
//! - **URL errors**: the source URL failed syntactic validation
//! - **HTTP errors**: the server answered with a status outside `200..400`
//! - **Transport errors**: DNS, connection, TLS or timeout failures
//! - **Decompression errors**: a gzip payload could not be inflated
//! - **XML errors**: the payload was empty and did not parse
//!
//! Callers that want retries can consult [`Error::is_recoverable`]:
//!
//! ```rust
//! use sitemap_resolver::Error;
//!
//! let err = Error::BadStatus {
//!     url: "https://example.com/sitemap.xml".to_string(),
//!     status: 503,
//! };
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), "http_status");
//! ```

use thiserror::Error;

/// Boxed error produced by a [`Fetcher`](crate::Fetcher) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for sitemap resolution.
#[derive(Error, Debug)]
pub enum Error {
    /// The URL is not syntactically valid.
    ///
    /// Raised before any network call is made. A valid source URL parses
    /// and carries a host.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The fetch completed but the status code is outside `200..400`.
    #[error("Bad status code {status} for {url}")]
    BadStatus {
        /// URL that was requested.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// The request could not be completed at the transport level.
    ///
    /// Covers DNS resolution, refused connections, TLS failures and
    /// timeouts. The implementor's error is preserved as the source.
    #[error("Transport error for {url}: {source}")]
    Transport {
        /// URL that was requested.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: BoxError,
    },

    /// A payload detected as gzip could not be inflated.
    #[error("Failed to decompress {url}: {source}")]
    Decompression {
        /// URL whose payload was malformed.
        url: String,
        /// Inflate failure.
        #[source]
        source: std::io::Error,
    },

    /// The payload is empty and does not parse as XML.
    ///
    /// Non-empty payloads that fail to parse are not errors; they go through
    /// the plain-text fallback instead.
    #[error("The XML found at {url} doesn't appear to be valid")]
    InvalidXml {
        /// URL (or `<inline>` for caller-supplied content) that was empty.
        url: String,
    },

    /// A nested sitemap exceeded the configured `max_depth`.
    #[error("Sitemap nesting deeper than {max_depth} at {url}")]
    DepthExceeded {
        /// URL that would have been fetched.
        url: String,
        /// Configured limit.
        max_depth: usize,
    },

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Transport failures, `429` and `5xx` statuses are treated as transient.
    /// Everything else is a property of the content or the request and will
    /// fail again.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::BadStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Get the error category as a string identifier, for logs and metrics.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::BadStatus { .. } => "http_status",
            Self::Transport { .. } => "transport",
            Self::Decompression { .. } => "decompression",
            Self::InvalidXml { .. } => "invalid_xml",
            Self::DepthExceeded { .. } => "depth_exceeded",
            Self::Config(_) => "config",
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::io;

    fn transport() -> Error {
        Error::Transport {
            url: "https://example.com/sitemap.xml".to_string(),
            source: Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")),
        }
    }

    #[test]
    fn test_error_display_formatting() {
        let err = Error::BadStatus {
            url: "https://example.com/sitemap.xml".to_string(),
            status: 404,
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("https://example.com/sitemap.xml"));

        assert_eq!(
            Error::InvalidUrl("not a url".to_string()).to_string(),
            "Invalid URL: not a url"
        );
        assert!(transport().to_string().contains("refused"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as _;

        let err = transport();
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "refused");

        let err = Error::Decompression {
            url: "https://example.com/a.xml.gz".to_string(),
            source: io::Error::new(io::ErrorKind::InvalidData, "corrupt deflate stream"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_categories() {
        let cases = vec![
            (Error::InvalidUrl("x".to_string()), "invalid_url"),
            (
                Error::BadStatus {
                    url: "x".to_string(),
                    status: 500,
                },
                "http_status",
            ),
            (transport(), "transport"),
            (
                Error::Decompression {
                    url: "x".to_string(),
                    source: io::Error::other("bad"),
                },
                "decompression",
            ),
            (Error::InvalidXml { url: "x".to_string() }, "invalid_xml"),
            (
                Error::DepthExceeded {
                    url: "x".to_string(),
                    max_depth: 1,
                },
                "depth_exceeded",
            ),
            (Error::Config("x".to_string()), "config"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.category(), expected);
        }
    }

    #[test]
    fn test_error_recoverability() {
        let bad_status = |status| Error::BadStatus {
            url: "https://example.com/".to_string(),
            status,
        };

        assert!(transport().is_recoverable());
        assert!(bad_status(500).is_recoverable());
        assert!(bad_status(503).is_recoverable());
        assert!(bad_status(429).is_recoverable());

        assert!(!bad_status(404).is_recoverable());
        assert!(!bad_status(403).is_recoverable());
        assert!(!Error::InvalidUrl("x".to_string()).is_recoverable());
        assert!(!Error::InvalidXml { url: "x".to_string() }.is_recoverable());
    }

    #[test]
    fn test_error_from_toml() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("= nope");
        let err: Error = parsed.unwrap_err().into();
        match err {
            Error::Config(msg) => assert!(!msg.is_empty()),
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
