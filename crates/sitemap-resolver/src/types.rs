//! Core data types produced by the resolver.

use serde::{Deserialize, Serialize};

/// What a resolved source turned out to be.
///
/// Derived every time a URL is resolved; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// A `robots.txt` file carrying `Sitemap:` directives.
    Robots,
    /// A document whose root has `<sitemap>` children.
    SitemapIndex,
    /// A document whose root has `<url>` children.
    UrlSet,
    /// Anything else with content: split into whitespace tokens.
    PlainTextFallback,
}

/// One child pointer inside a sitemap index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Child sitemap URL, trimmed.
    pub loc: String,
    /// Carried for callers; never used to decide whether to fetch.
    pub lastmod: Option<String>,
}

impl IndexEntry {
    /// True when the child sitemap is served gzip-compressed (`.xml.gz`).
    pub fn is_compressed(&self) -> bool {
        self.loc.ends_with(".xml.gz")
    }
}

/// One leaf record from a url-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntry {
    /// Page URL, trimmed. Empty when the node has no `<loc>`.
    pub loc: String,
    /// `<priority>` text, verbatim.
    pub priority: Option<String>,
    /// `<lastmod>` text, verbatim.
    pub lastmod: Option<String>,
    /// `<changefreq>` text, verbatim.
    pub changefreq: Option<String>,
}

impl UrlEntry {
    /// Metadata for this entry, with absent fields as empty strings.
    pub fn metadata(&self) -> UrlMetadata {
        UrlMetadata {
            priority: self.priority.clone().unwrap_or_default(),
            lastmod: self.lastmod.clone().unwrap_or_default(),
            changefreq: self.changefreq.clone().unwrap_or_default(),
        }
    }
}

/// Per-URL metadata carried in metadata mode.
///
/// Values are copied verbatim from the source; nothing is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMetadata {
    /// Empty when absent.
    pub priority: String,
    /// Empty when absent.
    pub lastmod: String,
    /// Empty when absent.
    pub changefreq: String,
}

/// A single item produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Emission {
    /// A bare location.
    Loc(String),
    /// A location with its url-set metadata.
    WithMetadata {
        /// The page URL.
        loc: String,
        /// Metadata from the `<url>` node.
        metadata: UrlMetadata,
    },
}

impl Emission {
    /// The location, regardless of shape.
    pub fn loc(&self) -> &str {
        match self {
            Self::Loc(loc) | Self::WithMetadata { loc, .. } => loc,
        }
    }

    /// Metadata, when the emission carries any.
    pub const fn metadata(&self) -> Option<&UrlMetadata> {
        match self {
            Self::Loc(_) => None,
            Self::WithMetadata { metadata, .. } => Some(metadata),
        }
    }

    /// Consume the emission, keeping only the location.
    pub fn into_loc(self) -> String {
        match self {
            Self::Loc(loc) | Self::WithMetadata { loc, .. } => loc,
        }
    }
}
