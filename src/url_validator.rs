//! URL validation for outbound title lookups and rendered video links.
//!
//! Stored page URLs come from the browser side and are not trusted. Before a
//! URL is handed to an oEmbed endpoint or rendered as a link it must:
//! - parse as an absolute URL
//! - use HTTPS
//! - point at one of the video hosts we know how to look up

use url::Url;

/// Hosts whose oEmbed endpoints we query
const ALLOWED_DOMAINS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "vimeo.com",
    "dailymotion.com",
    "dai.ly",
];

#[derive(Debug, Clone, PartialEq)]
pub enum UrlValidationError {
    /// URL is malformed or cannot be parsed
    InvalidUrl(String),
    /// URL uses non-HTTPS scheme
    NotHttps,
    /// Domain is not in the allowlist
    DomainNotAllowed(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlValidationError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            UrlValidationError::NotHttps => write!(f, "Only HTTPS URLs are allowed"),
            UrlValidationError::DomainNotAllowed(domain) => {
                write!(f, "Domain not in allowlist: {}", domain)
            }
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// Check if a domain is in the allowlist
fn is_domain_allowed(host: &str) -> bool {
    let host_lower = host.to_lowercase();

    ALLOWED_DOMAINS.iter().any(|allowed| {
        // Exact match or subdomain ("www.youtube.com" matches "youtube.com")
        host_lower == *allowed || host_lower.ends_with(&format!(".{}", allowed))
    })
}

/// Validate a page URL before passing it to an oEmbed endpoint.
pub fn validate_video_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url =
        Url::parse(url_str.trim()).map_err(|e| UrlValidationError::InvalidUrl(e.to_string()))?;

    if url.scheme() != "https" {
        return Err(UrlValidationError::NotHttps);
    }

    let host = url
        .host_str()
        .ok_or_else(|| UrlValidationError::InvalidUrl("No host in URL".to_string()))?;

    if !is_domain_allowed(host) {
        return Err(UrlValidationError::DomainNotAllowed(host.to_string()));
    }

    Ok(url)
}
