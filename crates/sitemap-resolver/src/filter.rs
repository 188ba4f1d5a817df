//! Sitemap URL filter.
//!
//! Child sitemaps (from an index or a robots.txt directive) are followed only
//! when they look like sitemap files. Anything else is skipped without being
//! fetched.
//!
//! ```rust
//! use sitemap_resolver::filter::is_sitemap_url;
//!
//! assert!(is_sitemap_url("https://example.com/sitemap.xml"));
//! assert!(is_sitemap_url("https://example.com/posts.xml.gz"));
//! assert!(!is_sitemap_url("https://example.com/feed.rss"));
//! assert!(!is_sitemap_url("https://example.com/SITEMAP.XML"));
//! ```

use url::Url;

/// Suffixes accepted for child sitemaps. Matching is case-sensitive.
const SITEMAP_SUFFIXES: &[&str] = &[".xml", ".xml.gz"];

/// True if `candidate` parses as a URL and ends in `.xml` or `.xml.gz`.
pub fn is_sitemap_url(candidate: &str) -> bool {
    SITEMAP_SUFFIXES
        .iter()
        .any(|suffix| candidate.ends_with(suffix))
        && Url::parse(candidate).is_ok()
}
