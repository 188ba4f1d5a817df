//! Recursive sitemap resolution.
//!
//! [`SitemapResolver::resolve`] turns a robots.txt, sitemap index or url-set
//! URL into a lazy stream of [`Emission`]s. Resolution of one source goes
//! through these tiers, in order:
//!
//! 1. A URL whose path is exactly `/robots.txt` is scanned for `Sitemap:`
//!    directives; every target ending in `.xml` / `.xml.gz` is resolved in
//!    turn. robots.txt is never parsed as XML.
//! 2. Anything else is fetched, inflated if gzip, and validated as XML.
//! 3. A root with `<sitemap>` children is an index: each child `loc` that
//!    looks like a sitemap is resolved recursively, others are skipped.
//! 4. Otherwise a root with `<url>` children is a url-set: each entry is
//!    emitted, with metadata when [`ResolveOptions::include_metadata`] is set.
//! 5. Otherwise the raw text is split on whitespace and every token is
//!    emitted as a bare location. This also applies to non-empty payloads
//!    that are not XML at all. An empty payload that does not parse is
//!    [`Error::InvalidXml`].
//!
//! ## Laziness
//!
//! The stream walks the tree depth-first with an explicit stack of frames.
//! A child sitemap is fetched only when the consumer asks for an item that
//! needs it, and its whole subtree is drained before the next sibling is
//! fetched. Dropping the stream stops all further requests.
//!
//! ```no_run
//! use futures::StreamExt;
//! use sitemap_resolver::{HttpFetcher, ResolveOptions, SitemapResolver};
//!
//! # async fn example() -> sitemap_resolver::Result<()> {
//! let resolver = SitemapResolver::new(HttpFetcher::new()?, ResolveOptions::with_metadata());
//! let mut entries = resolver.resolve("https://example.com/robots.txt");
//! while let Some(entry) = entries.next().await {
//!     let entry = entry?;
//!     println!("{} {:?}", entry.loc(), entry.metadata());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Nothing detects cycles between sitemap indices. Without
//! [`ResolveOptions::max_depth`] a self-referencing index never ends.

use crate::config::ResolveOptions;
use crate::decompress::decompress;
use crate::document::{XmlElement, parse_document};
use crate::fetcher::{Fetcher, ensure_success, parse_source_url};
use crate::filter::is_sitemap_url;
use crate::robots::sitemap_directives;
use crate::types::{Emission, IndexEntry, SourceKind, UrlEntry};
use crate::{Error, Result};
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt, future};
use std::collections::VecDeque;
use tracing::{debug, instrument};
use url::Url;

/// Source label used in errors for caller-supplied content.
const INLINE_SOURCE: &str = "<inline>";

/// Path that marks a URL as a robots.txt file.
const ROBOTS_PATH: &str = "/robots.txt";

/// Resolves sitemap trees through a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct SitemapResolver<F> {
    fetcher: F,
    options: ResolveOptions,
}

/// One level of the depth-first walk.
#[derive(Debug)]
enum Frame {
    /// Sitemap URLs still to resolve, all at the same nesting depth.
    Sitemaps {
        depth: usize,
        pending: VecDeque<String>,
    },
    /// Emissions from a document that has already been fetched.
    Ready(VecDeque<Emission>),
}

struct Walk<'a, F> {
    resolver: &'a SitemapResolver<F>,
    stack: Vec<Frame>,
}

impl<F: Fetcher> Walk<'_, F> {
    async fn next(&mut self) -> Result<Option<Emission>> {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                return Ok(None);
            };

            match frame {
                Frame::Ready(queue) => {
                    if let Some(emission) = queue.pop_front() {
                        return Ok(Some(emission));
                    }
                },
                Frame::Sitemaps { depth, pending } => {
                    if let Some(url) = pending.pop_front() {
                        let depth = *depth;
                        let child = self.resolver.expand(&url, depth).await?;
                        self.stack.push(child);
                        continue;
                    }
                },
            }

            self.stack.pop();
        }
    }
}

impl<F: Fetcher> SitemapResolver<F> {
    /// Creates a resolver. `options` stay fixed for every call.
    pub const fn new(fetcher: F, options: ResolveOptions) -> Self {
        Self { fetcher, options }
    }

    /// Options this resolver was built with.
    pub const fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Lazily resolve `url` into a stream of emissions.
    ///
    /// The root URL itself is not subject to the `.xml` / `.xml.gz` filter.
    /// An invalid URL fails on the first poll, before anything is fetched.
    /// The stream ends after the first error.
    pub fn resolve(&self, url: &str) -> BoxStream<'_, Result<Emission>> {
        self.walk(Frame::Sitemaps {
            depth: 0,
            pending: VecDeque::from([url.to_string()]),
        })
    }

    /// Resolve `url` and collect every emission.
    pub async fn collect(&self, url: &str) -> Result<Vec<Emission>> {
        self.resolve(url).try_collect().await
    }

    /// Resolve sitemap XML that the caller already holds.
    ///
    /// Nested sitemaps referenced by an index are still fetched lazily.
    pub fn resolve_xml(&self, content: &str) -> BoxStream<'_, Result<Emission>> {
        match self.document_frame(content, INLINE_SOURCE, 0) {
            Ok(frame) => self.walk(frame),
            Err(err) => stream::once(future::ready(Err(err))).boxed(),
        }
    }

    /// Resolve the `Sitemap:` directives of robots.txt content the caller
    /// already holds.
    pub fn resolve_robots_txt(&self, content: &str) -> BoxStream<'_, Result<Emission>> {
        self.walk(robots_frame(content, 0))
    }

    fn walk(&self, first: Frame) -> BoxStream<'_, Result<Emission>> {
        let walk = Walk {
            resolver: self,
            stack: vec![first],
        };

        stream::try_unfold(walk, |mut walk| async move {
            let next = walk.next().await?;
            Ok::<_, Error>(next.map(|emission| (emission, walk)))
        })
        .boxed()
    }

    /// Fetch one source and turn it into the frame that yields its content.
    #[instrument(skip(self))]
    async fn expand(&self, raw_url: &str, depth: usize) -> Result<Frame> {
        let url = parse_source_url(raw_url)?;
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(Error::DepthExceeded {
                    url: url.to_string(),
                    max_depth,
                });
            }
        }

        let body = self.fetch_body(&url).await?;
        let text = String::from_utf8_lossy(&body);

        if url.path() == ROBOTS_PATH {
            return Ok(robots_frame(&text, depth));
        }
        self.document_frame(&text, raw_url, depth)
    }

    async fn fetch_body(&self, url: &Url) -> Result<Vec<u8>> {
        debug!("Fetching sitemap source");
        let response = self.fetcher.fetch(url).await?;
        ensure_success(url, response.status)?;

        decompress(response.body, response.content_type.as_deref()).map_err(|source| {
            Error::Decompression {
                url: url.to_string(),
                source,
            }
        })
    }

    fn document_frame(&self, text: &str, source: &str, depth: usize) -> Result<Frame> {
        let Some(root) = parse_document(text).into_root() else {
            if text.is_empty() {
                return Err(Error::InvalidXml {
                    url: source.to_string(),
                });
            }
            debug!(kind = ?SourceKind::PlainTextFallback, "Payload is not XML");
            return Ok(fallback_frame(text));
        };

        let kind = classify(&root);
        debug!(?kind, "Classified document");

        Ok(match kind {
            SourceKind::SitemapIndex => Frame::Sitemaps {
                depth: depth + 1,
                pending: sitemap_children(index_entries(&root).into_iter().map(|e| e.loc)),
            },
            SourceKind::UrlSet => Frame::Ready(
                url_entries(&root)
                    .into_iter()
                    .map(|entry| self.emission(entry))
                    .collect(),
            ),
            SourceKind::Robots | SourceKind::PlainTextFallback => fallback_frame(text),
        })
    }

    fn emission(&self, entry: UrlEntry) -> Emission {
        if self.options.include_metadata {
            let metadata = entry.metadata();
            Emission::WithMetadata {
                loc: entry.loc,
                metadata,
            }
        } else {
            Emission::Loc(entry.loc)
        }
    }
}

fn robots_frame(text: &str, depth: usize) -> Frame {
    debug!(kind = ?SourceKind::Robots, "Scanning robots.txt");
    Frame::Sitemaps {
        depth: depth + 1,
        pending: sitemap_children(sitemap_directives(text)),
    }
}

fn fallback_frame(text: &str) -> Frame {
    Frame::Ready(
        plain_text_tokens(text)
            .map(|token| Emission::Loc(token.to_string()))
            .collect(),
    )
}

/// Keep the candidates that look like sitemaps, preserving order.
fn sitemap_children(candidates: impl IntoIterator<Item = String>) -> VecDeque<String> {
    candidates
        .into_iter()
        .filter(|candidate| {
            let keep = is_sitemap_url(candidate);
            if !keep {
                debug!(url = %candidate, "Skipping non-sitemap child");
            }
            keep
        })
        .collect()
}

/// Decide what a parsed document is. Index beats url-set.
pub fn classify(root: &XmlElement) -> SourceKind {
    if root.has_child("sitemap") {
        SourceKind::SitemapIndex
    } else if root.has_child("url") {
        SourceKind::UrlSet
    } else {
        SourceKind::PlainTextFallback
    }
}

/// The `<sitemap>` children of an index, in document order.
///
/// `loc` is trimmed before the sitemap filter sees it, so a location wrapped
/// in whitespace or newlines is still followed.
pub fn index_entries(root: &XmlElement) -> Vec<IndexEntry> {
    root.children("sitemap")
        .map(|node| IndexEntry {
            loc: node.child_text("loc").unwrap_or_default().to_string(),
            lastmod: node.child_text("lastmod").map(str::to_string),
        })
        .collect()
}

/// The `<url>` children of a url-set, in document order.
///
/// A `<url>` without `<loc>` still produces an entry, with an empty `loc`.
pub fn url_entries(root: &XmlElement) -> Vec<UrlEntry> {
    root.children("url")
        .map(|node| UrlEntry {
            loc: node.child_text("loc").unwrap_or_default().to_string(),
            priority: node.child_text("priority").map(str::to_string),
            lastmod: node.child_text("lastmod").map(str::to_string),
            changefreq: node.child_text("changefreq").map(str::to_string),
        })
        .collect()
}

/// Whitespace-delimited tokens of `text`, verbatim.
///
/// Separators are ASCII whitespace plus vertical tab (`\x0B`).
pub fn plain_text_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_token_separator).filter(|token| !token.is_empty())
}

const fn is_token_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}
