use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use shelf_crawler::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses a URL string, accepting only http and https URLs with a host
pub fn parse_http_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Checks that a URL lives on the allowed domain
///
/// The comparison is an exact, case-insensitive host match: subdomains of the
/// allowed domain are other domains. Ports are ignored.
pub fn ensure_allowed_domain(url: &Url, allowed_domain: &str) -> UrlResult<()> {
    let domain = extract_domain(url).ok_or(UrlError::MissingDomain)?;
    let allowed = allowed_domain.to_lowercase();

    if domain == allowed {
        Ok(())
    } else {
        Err(UrlError::DomainNotAllowed { domain, allowed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_parse_http_url_accepts_http_and_https() {
        assert!(parse_http_url("http://example.com/a").is_ok());
        assert!(parse_http_url("https://example.com/a").is_ok());
    }

    #[test]
    fn test_parse_http_url_rejects_other_schemes() {
        assert!(matches!(
            parse_http_url("mailto:someone@example.com"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(
            parse_http_url("ftp://example.com/file"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_parse_http_url_rejects_relative() {
        assert!(matches!(
            parse_http_url("/product/1"),
            Err(UrlError::Parse(_))
        ));
    }

    #[test]
    fn test_allowed_domain_matches_exactly() {
        let url = Url::parse("https://example.com/product/1").unwrap();
        assert!(ensure_allowed_domain(&url, "example.com").is_ok());
        assert!(ensure_allowed_domain(&url, "EXAMPLE.com").is_ok());
    }

    #[test]
    fn test_subdomain_is_not_allowed() {
        let url = Url::parse("https://shop.example.com/").unwrap();
        assert!(matches!(
            ensure_allowed_domain(&url, "example.com"),
            Err(UrlError::DomainNotAllowed { .. })
        ));
    }

    #[test]
    fn test_port_is_ignored() {
        let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
        assert!(ensure_allowed_domain(&url, "127.0.0.1").is_ok());
    }
}
