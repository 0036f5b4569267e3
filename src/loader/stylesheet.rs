//! Stylesheet and favicon links in the document head.

use log::{debug, warn};

use crate::dom::{self, Document};
use crate::loader::resources::ResourceLoader;

/// How a stylesheet request resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesheetStatus {
    /// The link was added and the stylesheet loaded.
    Loaded,
    /// The link was added but the stylesheet failed to load.
    Failed,
    /// A link with the same href was already in the head; nothing was done.
    AlreadyPresent,
}

fn has_link(doc: &Document, href: &str) -> bool {
    doc.select("head > link")
        .iter()
        .any(|link| link.attr("href").is_some_and(|h| &*h == href))
}

/// Load a CSS file.
///
/// Appends `<link rel="stylesheet">` to the head unless one with the same
/// href exists, then waits for the resource loader. Failures are logged.
pub async fn load_css(
    doc: &Document,
    href: &str,
    resources: &dyn ResourceLoader,
) -> StylesheetStatus {
    if has_link(doc, href) {
        return StylesheetStatus::AlreadyPresent;
    }
    doc.select("head").append_html(dom::element_html(
        "link",
        &[("rel", "stylesheet"), ("href", href)],
        "",
    ));
    match resources.load_stylesheet(href).await {
        Ok(()) => {
            debug!("loaded stylesheet {href}");
            StylesheetStatus::Loaded
        }
        Err(err) => {
            warn!("{err}");
            StylesheetStatus::Failed
        }
    }
}

/// Install the favicon, replacing any existing `link[rel=icon]`.
pub fn add_fav_icon(doc: &Document, href: &str) {
    let link = dom::element_html(
        "link",
        &[("rel", "icon"), ("type", "image/svg+xml"), ("href", href)],
        "",
    );
    let existing = doc.select(r#"head link[rel="icon"]"#).first();
    if existing.exists() {
        existing.replace_with_html(link);
    } else {
        doc.select("head").append_html(link);
    }
}
