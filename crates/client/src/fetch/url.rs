//! Request URL parsing.
//!
//! URLs are normalized before they become cache keys so that trivially
//! different spellings of the same resource share one entry.

/// Error type for request URL parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL has no host: {0}")]
    MissingHost(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse and normalize a request URL.
///
/// - surrounding whitespace is ignored
/// - a missing scheme defaults to `https://`
/// - only `http` and `https` are accepted, and a host is required
/// - the host is lower-cased by the parser; the fragment is dropped since
///   it never reaches the network
/// - the query string is kept verbatim
pub fn parse_request_url(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let with_scheme = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };
    let mut parsed = url::Url::parse(&with_scheme).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UrlError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::MissingHost(trimmed.to_string()));
    }

    parsed.set_fragment(None);
    Ok(parsed)
}
