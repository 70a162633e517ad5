use crate::config::DEFAULT_SKIP_PATTERNS;

/// Scheme token every followable URL must contain
const HTTP_TOKEN: &str = "http";

/// Returns true if a discovered URL may enter the frontier
///
/// Uses the default skip patterns. A URL is rejected when it is empty, does
/// not contain `http`, or contains any skip pattern.
///
/// # Examples
///
/// ```
/// use shelf_crawler::url::is_filterable;
///
/// assert!(is_filterable("https://example.com/product/1"));
/// assert!(!is_filterable("https://example.com/image/foo.png"));
/// assert!(!is_filterable("/relative/path"));
/// ```
pub fn is_filterable(url: &str) -> bool {
    is_filterable_with(url, DEFAULT_SKIP_PATTERNS)
}

/// Same as [`is_filterable`] with a caller-supplied deny-list
pub fn is_filterable_with<S: AsRef<str>>(url: &str, skip_patterns: &[S]) -> bool {
    if url.is_empty() || !url.contains(HTTP_TOKEN) {
        return false;
    }

    !skip_patterns
        .iter()
        .any(|pattern| url.contains(pattern.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_url_is_filterable() {
        assert!(is_filterable("https://example.com/product/1"));
        assert!(is_filterable("http://example.com/"));
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(!is_filterable(""));
    }

    #[test]
    fn test_url_without_http_rejected() {
        assert!(!is_filterable("/product/1"));
        assert!(!is_filterable("example.com/product/1"));
        assert!(!is_filterable("javascript:void(0)"));
    }

    #[test]
    fn test_deny_listed_urls_rejected() {
        assert!(!is_filterable("https://example.com/image/foo.png"));
        assert!(!is_filterable("https://example.com/page?cache=123"));
        assert!(!is_filterable("https://t.me/shopchannel"));
        assert!(!is_filterable("https://wa.me/15551234567"));
    }

    #[test]
    fn test_deny_list_is_substring_match() {
        // "images" contains "image"
        assert!(!is_filterable("https://example.com/images/banner"));
    }

    #[test]
    fn test_custom_skip_patterns() {
        let patterns = ["checkout"];
        assert!(!is_filterable_with("https://example.com/checkout", &patterns));
        assert!(is_filterable_with("https://example.com/image/foo.png", &patterns));
    }

    #[test]
    fn test_empty_skip_patterns() {
        let patterns: [&str; 0] = [];
        assert!(is_filterable_with("https://example.com/cache", &patterns));
        assert!(!is_filterable_with("", &patterns));
    }
}
