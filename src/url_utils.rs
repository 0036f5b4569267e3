//! URL Utility Functions
//!
//! Resolution of hrefs and sources found in authored markup, host matching
//! for link rewriting, and path extraction for image and script URLs.

use url::{ParseError, Url};

use crate::error::{Error, Result};

/// Base used to resolve relative sources when the page URL is unknown.
/// Only the path of such URLs is ever used.
const PLACEHOLDER_BASE: &str = "https://localhost/";

/// Parse an optional page URL into a base for resolution.
///
/// # Returns
/// * `Ok(None)` when no page URL is configured
pub fn page_base(page_url: Option<&str>) -> Result<Option<Url>> {
    page_url
        .map(|u| {
            Url::parse(u).map_err(|e| Error::InvalidUrl {
                url: u.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Resolve a URL string against an optional base, the way a browser
/// resolves `a.href`.
///
/// # Returns
/// * `Ok(None)` if the URL is relative and there is no base to resolve it against
/// * `Err(InvalidUrl)` if the URL is malformed
pub fn resolve(url_str: &str, base: Option<&Url>) -> Result<Option<Url>> {
    let url_str = url_str.trim();
    let parsed = match base {
        Some(base) => base.join(url_str),
        None => Url::parse(url_str),
    };
    match parsed {
        Ok(url) => Ok(Some(url)),
        Err(ParseError::RelativeUrlWithoutBase) => Ok(None),
        Err(e) => Err(Error::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// The resolved form of an href, as a browser reports `a.href`.
///
/// Relative hrefs are only resolved when there is a base; anything that
/// cannot be resolved is returned as written.
#[must_use]
pub fn absolute_href(href: &str, base: Option<&Url>) -> String {
    match resolve(href, base) {
        Ok(Some(url)) => url.to_string(),
        _ => href.to_string(),
    }
}

/// Check whether the URL's hostname contains any of the given domains.
#[must_use]
pub fn host_matches(url: &Url, domains: &[&str]) -> bool {
    url.host_str()
        .is_some_and(|host| domains.iter().any(|d| host.contains(d)))
}

/// The `?query` part of a URL, empty when there is no non-empty query.
#[must_use]
pub fn search(url: &Url) -> String {
    match url.query() {
        Some(q) if !q.is_empty() => format!("?{q}"),
        _ => String::new(),
    }
}

/// The `#fragment` part of a URL, empty when there is no non-empty fragment.
#[must_use]
pub fn hash(url: &Url) -> String {
    match url.fragment() {
        Some(f) if !f.is_empty() => format!("#{f}"),
        _ => String::new(),
    }
}

/// Path of a source URL, resolving relative sources against the page (or a
/// placeholder base when the page URL is unknown).
pub fn pathname(src: &str, base: Option<&Url>) -> Result<String> {
    let url = match base {
        Some(base) => resolve(src, Some(base))?,
        None => {
            let placeholder = Url::parse(PLACEHOLDER_BASE).map_err(|e| Error::InvalidUrl {
                url: PLACEHOLDER_BASE.to_string(),
                reason: e.to_string(),
            })?;
            resolve(src, Some(&placeholder))?
        }
    };
    url.map(|u| u.path().to_string()).ok_or_else(|| Error::InvalidUrl {
        url: src.to_string(),
        reason: "cannot resolve".to_string(),
    })
}

/// File extension of a path: everything after the last `.`, or the whole
/// path when it has none.
#[must_use]
pub fn extension(path: &str) -> &str {
    path.rsplit_once('.').map_or(path, |(_, ext)| ext)
}

/// Code base path derived from the loader script's URL: the part of its
/// path before `/scripts.js`.
pub fn code_base_path(script_src: &str, base: Option<&Url>) -> Result<String> {
    let path = pathname(script_src, base)?;
    Ok(path
        .split("/scripts.js")
        .next()
        .unwrap_or_default()
        .to_string())
}

/// Prefix site-relative paths (starting with `/`) with the code base path.
/// Absolute URLs are returned unchanged.
#[must_use]
pub fn with_code_base(code_base_path: &str, path: &str) -> String {
    if path.starts_with('/') && !path.starts_with("//") {
        format!("{code_base_path}{path}")
    } else {
        path.to_string()
    }
}
