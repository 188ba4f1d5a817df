//! `Sitemap:` directive scanning for robots.txt files.

use regex::Regex;
use std::sync::LazyLock;

/// `Sitemap:` anywhere on a line, capturing the rest of that line.
/// The keyword is case-sensitive.
static SITEMAP_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"Sitemap:[ \t]*([^\r\n]*)").expect("sitemap directive regex is valid")
});

/// Extract the target of every `Sitemap:` directive, in file order.
///
/// The keyword is honored wherever it appears on a line, so commented-out
/// and inline directives are followed too. Targets are trimmed and empty
/// ones dropped; filtering is left to the caller.
///
/// ```rust
/// use sitemap_resolver::robots::sitemap_directives;
///
/// let robots = "User-agent: *\nDisallow: /admin\n\nSitemap: https://example.com/sitemap.xml\n";
/// assert_eq!(sitemap_directives(robots), vec!["https://example.com/sitemap.xml"]);
/// ```
pub fn sitemap_directives(robots_txt: &str) -> Vec<String> {
    SITEMAP_DIRECTIVE
        .captures_iter(robots_txt)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|target| !target.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_directives_in_order() {
        let txt = r"
User-agent: *
Allow: /
Disallow: /admin
Crawl-delay: 1.5

Sitemap: https://example.com/sitemap.xml
Sitemap: https://example.com/sitemap-blog.xml.gz
";

        assert_eq!(
            sitemap_directives(txt),
            vec![
                "https://example.com/sitemap.xml",
                "https://example.com/sitemap-blog.xml.gz",
            ]
        );
    }

    #[test]
    fn test_tolerates_whitespace_and_crlf() {
        let txt = "User-agent: *\r\n  Sitemap:https://example.com/a.xml   \r\n\tSitemap: \t https://example.com/b.xml\r\n";
        assert_eq!(
            sitemap_directives(txt),
            vec!["https://example.com/a.xml", "https://example.com/b.xml"]
        );
    }

    #[test]
    fn test_keyword_is_case_sensitive() {
        let txt = "sitemap: https://example.com/lower.xml\nSITEMAP: https://example.com/upper.xml\n";
        assert!(sitemap_directives(txt).is_empty());
    }

    #[test]
    fn test_ignores_empty_directives() {
        let txt = "Sitemap:\nSitemap:   \r\nUser-agent: *\n";
        assert!(sitemap_directives(txt).is_empty());
    }

    #[test]
    fn test_follows_embedded_and_commented_directives() {
        let txt = "User-agent: * Sitemap: https://example.com/inline.xml\n# Sitemap: https://example.com/commented.xml\n";
        assert_eq!(
            sitemap_directives(txt),
            vec![
                "https://example.com/inline.xml",
                "https://example.com/commented.xml",
            ]
        );
    }

    #[test]
    fn test_keeps_non_sitemap_targets() {
        let txt = "Sitemap: https://example.com/feed.rss\nSitemap: https://example.com/sitemap.xml";
        assert_eq!(
            sitemap_directives(txt),
            vec!["https://example.com/feed.rss", "https://example.com/sitemap.xml"]
        );
    }

    #[test]
    fn test_no_directives() {
        assert!(sitemap_directives("").is_empty());
        assert!(sitemap_directives("User-agent: *\nDisallow:\n").is_empty());
    }
}
