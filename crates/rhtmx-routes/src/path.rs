//! URL dissection and percent-decoding helpers
//!
//! All functions are **pure**: same input, same output, no side effects.
//! The URL is an ordinary `path?query#hash` string; scheme and origin are
//! expected to be stripped by the caller.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use url::form_urlencoded;

// Every `%` must start a two-digit hex escape
static WELL_FORMED_ESCAPES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[^%]|%[0-9A-Fa-f]{2})*$").unwrap());

/// Borrowed pieces of a candidate URL
///
/// # Examples
///
/// ```
/// use rhtmx_routes::path::dissect;
///
/// let parts = dissect("/docs//api/?filter=beta#intro");
/// assert_eq!(parts.segments, vec!["docs", "api"]);
/// assert_eq!(parts.query, "filter=beta");
/// assert_eq!(parts.hash, "intro");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Non-empty path segments, still percent-encoded
    pub segments: Vec<&'a str>,
    /// Query string without the leading `?`
    pub query: &'a str,
    /// Fragment without the leading `#`
    pub hash: &'a str,
}

/// Splits a URL into path segments, query and hash
///
/// The hash is split off first, so a `?` inside the fragment stays in the
/// fragment.
pub fn dissect(url: &str) -> UrlParts<'_> {
    let (rest, hash) = url.split_once('#').unwrap_or((url, ""));
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

    UrlParts {
        segments: path.split('/').filter(|s| !s.is_empty()).collect(),
        query,
        hash,
    }
}

/// Percent-decodes a path segment, falling back to the raw text
///
/// A stray `%` or an escape sequence that isn't valid UTF-8 leaves the
/// whole segment undecoded. Zero-copy when the segment has nothing to
/// decode.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::path::decode_segment;
///
/// assert_eq!(decode_segment("API%20Specs"), "API Specs");
/// assert_eq!(decode_segment("a+b"), "a+b");
/// // Truncated UTF-8 sequence: kept as-is
/// assert_eq!(decode_segment("%E0%A4%A"), "%E0%A4%A");
/// // Malformed escape: nothing is decoded, not even `%41`
/// assert_eq!(decode_segment("%41%zz"), "%41%zz");
/// ```
pub fn decode_segment(raw: &str) -> Cow<'_, str> {
    if !WELL_FORMED_ESCAPES.is_match(raw) {
        tracing::debug!(segment = raw, "path segment has a malformed percent-escape, using raw value");
        return Cow::Borrowed(raw);
    }

    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::debug!(segment = raw, error = %err, "path segment is not valid percent-encoding, using raw value");
            Cow::Borrowed(raw)
        }
    }
}

/// Parses a query string with form-urlencoded rules (`+` is a space)
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Serializes query pairs with form-urlencoded rules
///
/// # Examples
///
/// ```
/// use rhtmx_routes::path::serialize_query;
///
/// let pairs = vec![("filter".to_string(), "beta release".to_string())];
/// assert_eq!(serialize_query(&pairs), "filter=beta+release");
/// ```
pub fn serialize_query(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Assembles the unconsumed remainder of a URL
///
/// Each non-empty part is prefixed with its delimiter, so the result is
/// empty or starts with `/`, `?` or `#`.
pub fn join_unused(segments: &[&str], query: &str, hash: &str) -> String {
    let mut unused = String::new();

    if !segments.is_empty() {
        unused.push('/');
        unused.push_str(&segments.join("/"));
    }
    if !query.is_empty() {
        unused.push('?');
        unused.push_str(query);
    }
    if !hash.is_empty() {
        unused.push('#');
        unused.push_str(hash);
    }

    unused
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dissect_plain_path() {
        let parts = dissect("/users/42");
        assert_eq!(parts.segments, vec!["users", "42"]);
        assert_eq!(parts.query, "");
        assert_eq!(parts.hash, "");
    }

    #[test]
    fn test_dissect_root() {
        assert!(dissect("/").segments.is_empty());
        assert!(dissect("").segments.is_empty());
    }

    #[test]
    fn test_dissect_question_mark_inside_hash() {
        let parts = dissect("/page#section?not-a-query");
        assert_eq!(parts.segments, vec!["page"]);
        assert_eq!(parts.query, "");
        assert_eq!(parts.hash, "section?not-a-query");
    }

    #[test]
    fn test_decode_segment_malformed_escape_keeps_raw() {
        assert_eq!(decode_segment("%41%zz"), "%41%zz");
        assert_eq!(decode_segment("100%"), "100%");
        assert_eq!(decode_segment("%4"), "%4");
        assert_eq!(decode_segment("%41%42"), "AB");
        // Invalid UTF-8 after decoding
        assert_eq!(decode_segment("%FF"), "%FF");
    }

    #[test]
    fn test_decode_segment_borrows_when_clean() {
        assert!(matches!(decode_segment("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_parse_query_plus_is_space() {
        assert_eq!(
            parse_query("term=hello+world&tag=a%26b"),
            vec![
                ("term".to_string(), "hello world".to_string()),
                ("tag".to_string(), "a&b".to_string())
            ]
        );
    }

    #[test]
    fn test_join_unused() {
        assert_eq!(join_unused(&[], "", ""), "");
        assert_eq!(join_unused(&["reference"], "", ""), "/reference");
        assert_eq!(join_unused(&[], "a=1", ""), "?a=1");
        assert_eq!(join_unused(&[], "", "top"), "#top");
        assert_eq!(
            join_unused(&["a", "b"], "filter=beta", "intro"),
            "/a/b?filter=beta#intro"
        );
    }
}
