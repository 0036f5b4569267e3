//! Page-wide context shared by the orchestrator and block behaviors.

use std::cell::RefCell;

use log::warn;
use url::Url;

use crate::dom::Document;
use crate::options::Options;
use crate::patterns::LOADER_SCRIPT;
use crate::url_utils;

/// One or many publish dependency URLs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dependencies(pub Vec<String>);

impl From<&str> for Dependencies {
    fn from(url: &str) -> Self {
        Self(vec![url.to_string()])
    }
}

impl From<String> for Dependencies {
    fn from(url: String) -> Self {
        Self(vec![url])
    }
}

impl From<Vec<String>> for Dependencies {
    fn from(urls: Vec<String>) -> Self {
        Self(urls)
    }
}

impl From<&[&str]> for Dependencies {
    fn from(urls: &[&str]) -> Self {
        Self(urls.iter().map(|u| (*u).to_string()).collect())
    }
}

/// Context established before decoration starts.
///
/// The page URL, code base path and lighthouse flag are fixed once built.
/// Publish dependencies are append-only and may be added by block behaviors.
#[derive(Debug, Default)]
pub struct PageContext {
    page_base: Option<Url>,
    code_base_path: String,
    lighthouse: bool,
    dependencies: RefCell<Vec<String>>,
}

impl PageContext {
    /// Context with an explicit code base path.
    #[must_use]
    pub fn new(code_base_path: &str) -> Self {
        Self {
            code_base_path: code_base_path.to_string(),
            ..Self::default()
        }
    }

    /// Derive the context from the document and options.
    ///
    /// The code base path is the directory of the `scripts.js` loader script
    /// (empty if there is none or its URL is unusable). `lighthouse` is set
    /// when the page URL has `lighthouse=on`.
    #[must_use]
    pub fn from_document(doc: &Document, options: &Options) -> Self {
        let base = url_utils::page_base(options.page_url.as_deref()).unwrap_or_else(|err| {
            warn!("ignoring page url: {err}");
            None
        });

        let script = doc.select(LOADER_SCRIPT).first();
        let code_base_path = script
            .attr("src")
            .and_then(|src| match url_utils::code_base_path(&src, base.as_ref()) {
                Ok(path) => Some(path),
                Err(err) => {
                    warn!("cannot derive code base path: {err}");
                    None
                }
            })
            .unwrap_or_default();

        let lighthouse = base.as_ref().is_some_and(|url| {
            url.query_pairs()
                .any(|(k, v)| k == "lighthouse" && v == "on")
        });

        Self {
            page_base: base,
            code_base_path,
            lighthouse,
            dependencies: RefCell::new(Vec::new()),
        }
    }

    /// The page URL relative hrefs and sources resolve against, if known.
    #[must_use]
    pub fn page_base(&self) -> Option<&Url> {
        self.page_base.as_ref()
    }

    /// Path prefix under which blocks, styles and icons are served.
    #[must_use]
    pub fn code_base_path(&self) -> &str {
        &self.code_base_path
    }

    /// Whether the page runs under a Lighthouse audit.
    #[must_use]
    pub fn lighthouse(&self) -> bool {
        self.lighthouse
    }

    /// Add one or more URLs to the dependencies for publishing.
    pub fn add_publish_dependencies(&self, urls: impl Into<Dependencies>) {
        self.dependencies.borrow_mut().extend(urls.into().0);
    }

    /// Publish dependencies added so far, in insertion order.
    #[must_use]
    pub fn dependencies(&self) -> Vec<String> {
        self.dependencies.borrow().clone()
    }
}
