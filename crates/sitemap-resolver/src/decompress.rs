//! Gzip detection and inflation for fetched payloads.
//!
//! Sitemaps are frequently published as `.xml.gz` files. Those bodies arrive
//! still compressed (they are not `Content-Encoding: gzip`), so the resolver
//! inflates them itself before classification.

use flate2::read::GzDecoder;
use std::io::{self, Read};

/// Magic prefix of a deflate-compressed gzip member.
pub const GZIP_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];

/// Media types that declare a gzip body.
const GZIP_CONTENT_TYPES: &[&str] = &[
    "application/gzip",
    "application/x-gzip",
    "application/gzip-compressed",
    "application/x-gzip-compressed",
];

/// True if the payload should be inflated.
///
/// Either the content type names a gzip media type (parameters and case are
/// ignored) or the body starts with [`GZIP_MAGIC`].
pub fn is_gzip(body: &[u8], content_type: Option<&str>) -> bool {
    body.starts_with(&GZIP_MAGIC) || content_type.is_some_and(is_gzip_content_type)
}

fn is_gzip_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    GZIP_CONTENT_TYPES.contains(&essence.as_str())
}

/// Inflate `body` when it is gzip, otherwise hand it back untouched.
pub fn decompress(body: Vec<u8>, content_type: Option<&str>) -> io::Result<Vec<u8>> {
    if body.is_empty() || !is_gzip(&body, content_type) {
        return Ok(body);
    }

    let mut decoder = GzDecoder::new(body.as_slice());
    let mut inflated = Vec::with_capacity(body.len().saturating_mul(4));
    decoder.read_to_end(&mut inflated)?;
    Ok(inflated)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_detects_magic_bytes() {
        let compressed = gzip(b"<urlset/>");
        assert!(compressed.starts_with(&GZIP_MAGIC));
        assert!(is_gzip(&compressed, None));
        assert!(is_gzip(&compressed, Some("application/xml")));
        assert!(!is_gzip(b"<urlset/>", None));
        assert!(!is_gzip(&[0x1f, 0x8b], None));
    }

    #[test]
    fn test_detects_gzip_content_type() {
        assert!(is_gzip(b"", Some("application/x-gzip")));
        assert!(is_gzip(b"", Some("Application/GZIP; charset=binary")));
        assert!(!is_gzip(b"", Some("text/plain")));
        assert!(!is_gzip(b"", Some("application/xml; charset=utf-8")));
    }

    #[test]
    fn test_inflates_gzip_payload() {
        let xml = b"<urlset><url><loc>https://example.com/</loc></url></urlset>";
        let inflated = decompress(gzip(xml), None).unwrap();
        assert_eq!(inflated, xml);
    }

    #[test]
    fn test_plain_payload_passes_through() {
        let body = b"User-agent: *\nSitemap: https://example.com/sitemap.xml\n".to_vec();
        let out = decompress(body.clone(), Some("text/plain")).unwrap();
        assert_eq!(out, body);
    }

    #[test]
    fn test_truncated_gzip_fails() {
        let mut compressed = gzip(b"<urlset><url><loc>https://example.com/</loc></url></urlset>");
        compressed.truncate(compressed.len() / 2);
        assert!(decompress(compressed, None).is_err());
    }

    #[test]
    fn test_gzip_content_type_with_plain_body_fails() {
        let result = decompress(b"<urlset/>".to_vec(), Some("application/gzip"));
        assert!(result.is_err());
    }
}
