//! URL canonicalization and shape validation.
//!
//! Submitted URLs are stored without scheme and `www.` prefix, so
//! `http://www.example.com/page` and `example.com/page` map to the same record.

use regex::Regex;
use std::sync::LazyLock;

static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid scheme regex"));

static WWW_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^www\.").expect("valid www regex"));

/// Dot-separated host ending in a TLD, optional port, optional path/query/fragment.
static URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\da-z-]+(\.[\da-z-]+)*\.[a-z]{2,63}(:\d{1,5})?([/?#]\S*)?$")
        .expect("valid url shape regex")
});

/// Strips a leading `http://`/`https://` and a leading `www.` (case-insensitive).
///
/// Stripping repeats until nothing changes, which makes the function
/// idempotent: `clean_url(&clean_url(x)) == clean_url(x)`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_url("http://www.example.com/page"), "example.com/page");
/// assert_eq!(clean_url("HTTPS://WWW.Example.com"), "Example.com");
/// ```
pub fn clean_url(url: &str) -> String {
    let mut current = url.to_string();

    loop {
        let without_scheme = SCHEME_PREFIX.replace(current.trim(), "");
        let stripped = WWW_PREFIX.replace(&without_scheme, "").into_owned();

        if stripped == current {
            return current;
        }
        current = stripped;
    }
}

/// Checks a canonical URL against the permissive shape pattern.
///
/// Requires a dot-separated host; path, query and port are optional. Whitespace
/// is never allowed.
pub fn is_valid_url(canonical: &str) -> bool {
    URL_SHAPE.is_match(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_scheme_and_www() {
        assert_eq!(clean_url("http://www.example.com/page"), "example.com/page");
        assert_eq!(clean_url("https://example.com"), "example.com");
        assert_eq!(clean_url("www.example.com"), "example.com");
    }

    #[test]
    fn test_clean_is_case_insensitive() {
        assert_eq!(clean_url("HTTPS://WWW.example.com/A"), "example.com/A");
        assert_eq!(clean_url("Http://Www.example.com"), "example.com");
    }

    #[test]
    fn test_clean_keeps_other_schemes() {
        assert_eq!(clean_url("ftp://example.com"), "ftp://example.com");
    }

    #[test]
    fn test_clean_trims_whitespace() {
        assert_eq!(clean_url("  https://example.com/x \n"), "example.com/x");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            "",
            "http://",
            "http://http://www.example.com",
            "www.https://example.com",
            "www.www.example.com",
            "HTTPS://www.HTTP://x.io",
            "example.com/page",
            "  www. spaced.com ",
            "ftp://example.com",
        ];

        for input in inputs {
            let once = clean_url(input);
            assert_eq!(clean_url(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_valid_urls() {
        for url in [
            "example.com",
            "example.com/page",
            "sub.example.co.uk/path/to/page",
            "example.com:8080/api",
            "example.com/search?q=rust&lang=en",
            "example.com/page#section",
            "my-site.io/",
            "EXAMPLE.COM/Path",
        ] {
            assert!(is_valid_url(url), "{url} should be valid");
        }
    }

    #[test]
    fn test_invalid_urls() {
        for url in [
            "",
            "not-a-url",
            "localhost",
            "localhost:3000/x",
            "example.",
            ".com",
            "exa mple.com",
            "example.com/with space",
            "ftp://example.com",
            "example.c",
        ] {
            assert!(!is_valid_url(url), "{url} should be invalid");
        }
    }

    #[test]
    fn test_clean_then_validate() {
        assert!(is_valid_url(&clean_url("http://www.example.com/page")));
        assert!(!is_valid_url(&clean_url("http://")));
    }
}
