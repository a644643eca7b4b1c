//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::{AppError, Result};

/// Parse `base` and append the given query parameters.
pub fn build_url(base: &str, params: &[(&str, String)]) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| AppError::invalid_url(base, e))?;
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> Result<Url> {
    base.join(href).map_err(|e| AppError::invalid_url(href, e))
}
