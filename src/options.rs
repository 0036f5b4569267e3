//! Configuration options for page decoration.
//!
//! The `Options` struct replaces the constants and commented-out toggles a
//! page script would normally hard-code: which hosts count as "ours", how
//! legacy paths are rewritten, which blocks gate the LCP and which optional
//! decoration passes run.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Hosts whose absolute links are always rewritten to site-relative paths.
pub const STAGING_DOMAINS: &[&str] = &["hlx3.page", "hlx.page", "hlx.live"];

/// One responsive breakpoint for optimized pictures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Media query for the `<source>`; the last breakpoint usually has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,

    /// Requested rendition width, passed through as the `width` query value.
    pub width: String,
}

impl Breakpoint {
    /// Breakpoint with a media query.
    #[must_use]
    pub fn new(media: &str, width: &str) -> Self {
        Self {
            media: Some(media.to_string()),
            width: width.to_string(),
        }
    }

    /// Breakpoint without a media query.
    #[must_use]
    pub fn width(width: &str) -> Self {
        Self {
            media: None,
            width: width.to_string(),
        }
    }
}

/// The default breakpoints: a 2000px rendition above 400px, 750px otherwise.
#[must_use]
pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new("(min-width: 400px)", "2000"),
        Breakpoint::width("750"),
    ]
}

/// A single legacy path rewrite applied to links on configured hosts.
///
/// Rules run in order and each replaces at most one occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathRewrite {
    /// Replace the first occurrence of `from` with `to` when present.
    Replace { from: String, to: String },
    /// Remove `prefix` when the path starts with it.
    StripPrefix { prefix: String },
    /// Remove the first occurrence of `suffix` when the path ends with it.
    StripSuffix { suffix: String },
}

impl PathRewrite {
    /// Apply the rule to a path, returning the rewritten path.
    #[must_use]
    pub fn apply(&self, path: &str) -> String {
        match self {
            Self::Replace { from, to } => path.replacen(from.as_str(), to, 1),
            Self::StripPrefix { prefix } => match path.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.to_string(),
                None => path.to_string(),
            },
            // Mirrors a first-occurrence replace guarded by an ends-with check,
            // so "/a.html/b.html" becomes "/a/b.html".
            Self::StripSuffix { suffix } => {
                if path.ends_with(suffix.as_str()) {
                    path.replacen(suffix.as_str(), "", 1)
                } else {
                    path.to_string()
                }
            }
        }
    }
}

/// The legacy rewrites used by the site: stories moved to news, year
/// folders and the old locale prefix dropped, `.html` extensions removed.
#[must_use]
pub fn default_path_rewrites() -> Vec<PathRewrite> {
    vec![
        PathRewrite::Replace {
            from: "/stories/".to_string(),
            to: "/news/".to_string(),
        },
        PathRewrite::Replace {
            from: "/2015/".to_string(),
            to: "/".to_string(),
        },
        PathRewrite::Replace {
            from: "/2016/".to_string(),
            to: "/".to_string(),
        },
        PathRewrite::StripPrefix {
            prefix: "/content/journey/nz/en".to_string(),
        },
        PathRewrite::StripSuffix {
            suffix: ".html".to_string(),
        },
    ]
}

/// Settings for the delayed (third-party tag) phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayedOptions {
    /// Whether the delayed phase runs at all.
    ///
    /// Default: `false`
    pub enabled: bool,

    /// Milliseconds to wait after the lazy phase before injecting tags.
    ///
    /// Default: `3000`
    pub delay_ms: u64,

    /// Google Tag Manager container id. Nothing is injected when unset.
    ///
    /// Default: `None`
    pub tag_manager_id: Option<String>,
}

impl Default for DelayedOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_ms: 3000,
            tag_manager_id: None,
        }
    }
}

/// Configuration options for page decoration.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings; JSON configs may omit any field.
///
/// # Example
///
/// ```rust
/// use page_decorator::Options;
///
/// let options = Options {
///     lcp_blocks: vec!["hero".to_string()],
///     ..Options::default()
/// };
/// assert!(options.rewrite_links);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// URL of the page being decorated. Used to resolve relative hrefs,
    /// image sources and the `lighthouse` query flag.
    ///
    /// Default: `None`
    pub page_url: Option<String>,

    /// Production hosts whose links are made relative, in addition to
    /// [`STAGING_DOMAINS`]. Matching is by substring of the hostname.
    ///
    /// Default: empty
    pub production_domains: Vec<String>,

    /// Ordered legacy path rewrites for relative-made links.
    ///
    /// Default: [`default_path_rewrites`]
    pub path_rewrites: Vec<PathRewrite>,

    /// Heading levels allowed in the content (`"h1"` … `"h6"`). Headings
    /// outside the set are clamped. Empty disables normalization.
    ///
    /// Default: empty
    pub allowed_headings: Vec<String>,

    /// Blocks which, when first on the page, are loaded before the page is
    /// revealed.
    ///
    /// Default: `["animation"]`
    pub lcp_blocks: Vec<String>,

    /// Breakpoints for optimized pictures.
    ///
    /// Default: [`default_breakpoints`]
    pub breakpoints: Vec<Breakpoint>,

    /// Block class names inside which links are never turned into buttons.
    ///
    /// Default: empty
    pub no_button_blocks: Vec<String>,

    /// Rewrite links on configured hosts to relative paths.
    ///
    /// Default: `true`
    pub rewrite_links: bool,

    /// Replace `/media_` images with optimized pictures.
    ///
    /// Default: `false`
    pub decorate_pictures: bool,

    /// Infer button classes for standalone links.
    ///
    /// Default: `false`
    pub decorate_buttons: bool,

    /// Rebase `.icon` image sources onto the code base path.
    ///
    /// Default: `false`
    pub decorate_icons: bool,

    /// Build a `hero` auto-block from a leading picture and `h1`.
    ///
    /// Default: `false`
    pub build_hero_block: bool,

    /// Wrap section content and lift section metadata. When disabled the
    /// markup must already carry `section` classes for blocks to be found.
    ///
    /// Default: `true`
    pub decorate_sections: bool,

    /// Prepend background pictures to sections with `data-background`.
    ///
    /// Default: `false`
    pub section_backgrounds: bool,

    /// Add the `theme` page metadata as a body class.
    ///
    /// Default: `false`
    pub apply_theme: bool,

    /// Build and load a synthetic `header` block in `<header>`.
    ///
    /// Default: `true`
    pub load_header: bool,

    /// Build and load a synthetic `footer` block in `<footer>`.
    ///
    /// Default: `false`
    pub load_footer: bool,

    /// Non-critical stylesheets requested in the lazy phase. Paths starting
    /// with `/` are prefixed with the code base path.
    ///
    /// Default: `["/styles/lazy-styles.css"]`
    pub lazy_stylesheets: Vec<String>,

    /// Favicon installed in the lazy phase (same prefix rule as above).
    ///
    /// Default: `Some("/styles/favicon.ico")`
    pub favicon: Option<String>,

    /// Delayed phase settings.
    pub delayed: DelayedOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            page_url: None,
            production_domains: Vec::new(),
            path_rewrites: default_path_rewrites(),
            allowed_headings: Vec::new(),
            lcp_blocks: vec!["animation".to_string()],
            breakpoints: default_breakpoints(),
            no_button_blocks: Vec::new(),
            rewrite_links: true,
            decorate_pictures: false,
            decorate_buttons: false,
            decorate_icons: false,
            build_hero_block: false,
            decorate_sections: true,
            section_backgrounds: false,
            apply_theme: false,
            load_header: true,
            load_footer: false,
            lazy_stylesheets: vec!["/styles/lazy-styles.css".to_string()],
            favicon: Some("/styles/favicon.ico".to_string()),
            delayed: DelayedOptions::default(),
        }
    }
}

impl Options {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Staging plus production hosts, in that order.
    #[must_use]
    pub fn rewrite_domains(&self) -> Vec<&str> {
        STAGING_DOMAINS
            .iter()
            .copied()
            .chain(self.production_domains.iter().map(String::as_str))
            .collect()
    }
}
