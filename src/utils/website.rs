//! Website URL checks for charity records.

use std::borrow::Cow;

use url::Url;
use validator::ValidationError;

/// Errors that can occur while checking a website URL.
#[derive(Debug, thiserror::Error)]
pub enum WebsiteError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Parses a charity website and checks that it is an absolute HTTP(S) URL.
///
/// The input is returned to the caller unchanged by the store; this function
/// only decides whether it is acceptable.
///
/// # Errors
///
/// Returns [`WebsiteError::InvalidFormat`] for malformed or relative URLs.
/// Returns [`WebsiteError::UnsupportedProtocol`] for non-HTTP(S) schemes such
/// as `javascript:` or `ftp:`.
/// Returns [`WebsiteError::MissingHost`] when no host is present.
pub fn parse_website(input: &str) -> Result<Url, WebsiteError> {
    let url = Url::parse(input).map_err(|e| WebsiteError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(WebsiteError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(WebsiteError::MissingHost),
    }
}

/// `validator` adapter for [`parse_website`].
pub fn validate_website(input: &str) -> Result<(), ValidationError> {
    parse_website(input).map(|_| ()).map_err(|e| {
        ValidationError::new("website").with_message(Cow::Owned(format!("website: {e}")))
    })
}
