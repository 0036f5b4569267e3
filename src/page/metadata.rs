//! Page metadata lookup.

use crate::dom::Document;

/// Retrieve the content of a metadata tag.
///
/// Names containing `:` (Open Graph style) are looked up by `property`,
/// everything else by `name`.
#[must_use]
pub fn get_metadata(doc: &Document, name: &str) -> Option<String> {
    let attr = if name.contains(':') { "property" } else { "name" };
    doc.select("head meta")
        .iter()
        .find(|meta| meta.attr(attr).is_some_and(|v| &*v == name))
        .and_then(|meta| meta.attr("content").map(|c| c.to_string()))
}
