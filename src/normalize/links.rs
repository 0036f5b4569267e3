//! Link rewriting.
//!
//! Absolute links pointing at staging or production hosts are turned into
//! site-relative paths, with legacy path segments rewritten on the way.

use log::{debug, warn};
use url::Url;

use crate::dom::Selection;
use crate::error::Result;
use crate::options::{Options, PathRewrite};
use crate::url_utils;

/// Rewrite a single href.
///
/// # Returns
/// * `Ok(Some(relative))` when the href points at one of `domains`
/// * `Ok(None)` when it does not (or is relative and there is no base)
/// * `Err(InvalidUrl)` when it cannot be parsed
pub fn rewrite_href(
    href: &str,
    base: Option<&Url>,
    domains: &[&str],
    rewrites: &[PathRewrite],
) -> Result<Option<String>> {
    let Some(url) = url_utils::resolve(href, base)? else {
        return Ok(None);
    };
    if !url_utils::host_matches(&url, domains) {
        return Ok(None);
    }

    let path = rewrites
        .iter()
        .fold(url.path().to_string(), |path, rule| rule.apply(&path));

    Ok(Some(format!(
        "{path}{}{}",
        url_utils::search(&url),
        url_utils::hash(&url)
    )))
}

/// Turn absolute links within the configured domains into relative links.
///
/// Links on other hosts are left byte-for-byte untouched. A malformed href
/// is logged and skipped; it never stops the remaining links.
///
/// # Returns
/// Number of links rewritten.
pub fn make_links_relative(root: &Selection, options: &Options) -> usize {
    let base = match url_utils::page_base(options.page_url.as_deref()) {
        Ok(base) => base,
        Err(err) => {
            warn!("ignoring page url: {err}");
            None
        }
    };
    let domains = options.rewrite_domains();

    let mut rewritten = 0;
    for a in root.select("a[href]").iter() {
        let Some(href) = a.attr("href") else {
            continue;
        };
        if href.is_empty() {
            continue;
        }
        match rewrite_href(&href, base.as_ref(), &domains, &options.path_rewrites) {
            Ok(Some(relative)) => {
                debug!("rewrote link {href} -> {relative}");
                a.set_attr("href", &relative);
                rewritten += 1;
            }
            Ok(None) => {}
            Err(err) => warn!("link left unmodified: {err}"),
        }
    }
    rewritten
}
