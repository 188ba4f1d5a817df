//! # sitemap-resolver
//!
//! Turns a robots.txt file, a sitemap index or a url-set into one flat, lazy
//! stream of page URLs, optionally with each URL's sitemap metadata.
//!
//! ## Architecture
//!
//! - **Resolver**: depth-first walk over nested sitemaps, exposed as a `Stream`
//! - **Fetching**: the [`Fetcher`] trait, with a reqwest-backed [`HttpFetcher`]
//! - **Decoding**: gzip inflation, XML validation and robots.txt scanning
//! - **Configuration**: resolution options and HTTP client settings from TOML
//! - **Error Handling**: one [`Error`] type with categories and recovery hints
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use sitemap_resolver::{HttpFetcher, ResolveOptions, SitemapResolver};
//!
//! # async fn run() -> sitemap_resolver::Result<()> {
//! let resolver = SitemapResolver::new(HttpFetcher::new()?, ResolveOptions::default());
//!
//! let mut urls = resolver.resolve("https://example.com/robots.txt");
//! while let Some(url) = urls.next().await {
//!     println!("{}", url?.loc());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Sitemap content that is already in memory can be resolved without a root
//! fetch:
//!
//! ```rust
//! use futures::TryStreamExt;
//! use sitemap_resolver::{HttpFetcher, ResolveOptions, SitemapResolver};
//!
//! # async fn run() -> sitemap_resolver::Result<()> {
//! let resolver = SitemapResolver::new(HttpFetcher::new()?, ResolveOptions::with_metadata());
//! let xml = r#"<urlset><url><loc>https://example.com/</loc><priority>1.0</priority></url></urlset>"#;
//!
//! let entries: Vec<_> = resolver.resolve_xml(xml).try_collect().await?;
//! assert_eq!(entries[0].metadata().map(|m| m.priority.as_str()), Some("1.0"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! A failure anywhere in the tree ends the stream after the items already
//! produced:
//!
//! ```rust,no_run
//! use sitemap_resolver::{Error, HttpFetcher, ResolveOptions, SitemapResolver};
//!
//! # async fn run() -> sitemap_resolver::Result<()> {
//! let resolver = SitemapResolver::new(HttpFetcher::new()?, ResolveOptions::default());
//! match resolver.collect("https://example.com/sitemap.xml").await {
//!     Ok(urls) => println!("Resolved {} URLs", urls.len()),
//!     Err(Error::BadStatus { url, status }) => eprintln!("{url} answered {status}"),
//!     Err(e) if e.is_recoverable() => eprintln!("Try again later: {e}"),
//!     Err(e) => eprintln!("Fatal error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

/// Resolution options and HTTP client settings
pub mod config;
/// Gzip detection and inflation
pub mod decompress;
/// XML validation and element access
pub mod document;
/// Error types and result aliases
pub mod error;
/// Fetching abstraction and the reqwest implementation
pub mod fetcher;
/// Child sitemap URL filter
pub mod filter;
/// Recursive resolution engine
pub mod resolver;
/// robots.txt directive scanning
pub mod robots;
/// Core data types
pub mod types;

// Re-export commonly used types
pub use config::{Config, HttpConfig, ResolveOptions};
pub use error::{Error, Result};
pub use fetcher::{FetchResponse, Fetcher, HttpFetcher};
pub use resolver::SitemapResolver;
pub use types::*;
