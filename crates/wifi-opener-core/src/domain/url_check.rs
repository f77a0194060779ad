//! Syntactic URL validation.
//!
//! A rule URL is only handed to the OS if it parses as an absolute URL
//! (`https:`, `mailto:`, `file:` ...).  Whether an application is registered
//! for its scheme is a separate, OS-level question answered by the agent's
//! URL opener; this module only checks the text.

use thiserror::Error;
use url::Url;

/// Why a URL string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("URL is empty")]
    Empty,

    #[error("URL has no scheme")]
    MissingScheme,

    /// Whitespace and control characters are never valid inside a URL.
    #[error("URL contains whitespace or control characters")]
    InvalidCharacter,

    #[error("URL is malformed: {0}")]
    Malformed(url::ParseError),
}

/// Parses `input` as an absolute URL.
///
/// The parser silently strips tabs and newlines and trims surrounding
/// spaces, so those are rejected up front.
///
/// # Errors
///
/// Returns [`UrlError`] when the string is empty, contains whitespace or
/// control characters, has no scheme, or is otherwise malformed.
pub fn parse_url(input: &str) -> Result<Url, UrlError> {
    if input.is_empty() {
        return Err(UrlError::Empty);
    }
    if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlError::InvalidCharacter);
    }

    let url = Url::parse(input).map_err(|e| match e {
        url::ParseError::RelativeUrlWithoutBase => UrlError::MissingScheme,
        other => UrlError::Malformed(other),
    })?;
    if url.scheme().is_empty() {
        return Err(UrlError::MissingScheme);
    }
    Ok(url)
}
