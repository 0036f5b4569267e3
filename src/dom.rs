//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate giving the decoration passes the
//! element-level operations they need: class lists, closest-ancestor lookup,
//! child-node counts and escaped markup building.

use std::borrow::Cow;

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// === Class Operations ===

/// Class names of the first element, in attribute order.
#[must_use]
pub fn class_list(sel: &Selection) -> Vec<String> {
    sel.attr("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Add a class unless it is already present, keeping attribute order.
pub fn add_class(sel: &Selection, class: &str) {
    if class.is_empty() {
        return;
    }
    for el in sel.iter() {
        let mut classes = class_list(&el);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            el.set_attr("class", &classes.join(" "));
        }
    }
}

/// Remove a class from every element in the selection.
pub fn remove_class(sel: &Selection, class: &str) {
    for el in sel.iter() {
        let classes: Vec<String> = class_list(&el).into_iter().filter(|c| c != class).collect();
        el.set_attr("class", &classes.join(" "));
    }
}

/// Check whether the first element carries a class.
#[must_use]
pub fn has_class(sel: &Selection, class: &str) -> bool {
    class_list(sel).iter().any(|c| c == class)
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Check whether the first element has the given (lowercase) tag.
#[must_use]
pub fn is_tag(sel: &Selection, tag: &str) -> bool {
    tag_name(sel).is_some_and(|t| t == tag)
}

/// Number of child nodes of the first element, text nodes included.
#[must_use]
pub fn child_node_count(sel: &Selection) -> usize {
    sel.nodes().first().map_or(0, |node| node.children().len())
}

/// Text content with surrounding whitespace removed.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

// === Tree Navigation ===

/// Direct element children of the first element, in document order.
#[must_use]
pub fn element_children<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.children().iter().collect()
}

/// All child nodes of the first element (text and comments included), in
/// document order.
#[must_use]
pub fn child_nodes<'a>(sel: &Selection<'a>) -> Vec<NodeRef<'a>> {
    sel.nodes().first().map(NodeRef::children).unwrap_or_default()
}

/// Nearest ancestor-or-self matching a CSS selector.
#[must_use]
pub fn closest<'a>(sel: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    let mut node = sel.nodes().first().cloned();
    while let Some(current) = node {
        if current.is_element() {
            let candidate = Selection::from(current.clone());
            if candidate.is(selector) {
                return Some(candidate);
            }
        }
        node = current.parent();
    }
    None
}

/// Parent element of the first element, if it has one.
#[must_use]
pub fn parent_element<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes()
        .first()
        .and_then(NodeRef::parent)
        .filter(NodeRef::is_element)
        .map(Selection::from)
}

/// Whether two selections start at the same node.
#[must_use]
pub fn same_node(a: &Selection, b: &Selection) -> bool {
    match (a.nodes().first(), b.nodes().first()) {
        (Some(x), Some(y)) => x.id == y.id,
        _ => false,
    }
}

/// Whether `a` comes before `b` in document order, within `root`.
#[must_use]
pub fn precedes(root: &Selection, a: &Selection, b: &Selection) -> bool {
    for el in root.select("*").iter() {
        if same_node(&el, a) {
            return true;
        }
        if same_node(&el, b) {
            return false;
        }
    }
    false
}

// === Markup ===

/// Escape text for use inside element content.
#[must_use]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

const VOID_ELEMENTS: &[&str] = &["img", "source", "link", "meta", "br", "input"];

/// Render `<tag a="b">inner</tag>` with escaped attribute values.
#[must_use]
pub fn element_html(tag: &str, attrs: &[(&str, &str)], inner: &str) -> String {
    let mut html = format!("<{tag}");
    for (name, value) in attrs {
        html.push_str(&format!(" {name}=\"{}\"", escape(value)));
    }
    html.push('>');
    if VOID_ELEMENTS.contains(&tag) {
        return html;
    }
    html.push_str(inner);
    html.push_str(&format!("</{tag}>"));
    html
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_order_and_dedup() {
        let doc = parse(r#"<div class="cards  wide"></div>"#);
        let div = doc.select("div");
        add_class(&div, "cards");
        add_class(&div, "block");
        assert_eq!(class_list(&div), vec!["cards", "wide", "block"]);
        remove_class(&div, "wide");
        assert_eq!(class_list(&div), vec!["cards", "block"]);
        assert!(has_class(&div, "block"));
    }

    #[test]
    fn test_closest_includes_self() {
        let doc = parse(r#"<div class="section"><div><p id="x">t</p></div></div>"#);
        let p = doc.select("#x");
        let section = closest(&p, ".section").expect("section ancestor");
        assert!(has_class(&section, "section"));
        assert!(closest(&p, "p").is_some());
        assert!(closest(&p, "table").is_none());
    }

    #[test]
    fn test_child_node_count_counts_text() {
        let doc = parse(r#"<p id="a"><a href="/x">x</a></p><p id="b">hi <a href="/x">x</a></p>"#);
        assert_eq!(child_node_count(&doc.select("#a")), 1);
        assert_eq!(child_node_count(&doc.select("#b")), 2);
    }

    #[test]
    fn test_child_nodes_include_text() {
        let doc = parse(r#"<div id="d">a<b>b</b><!-- c -->d</div>"#);
        let nodes = child_nodes(&doc.select("#d"));
        assert_eq!(nodes.len(), 4);
        assert!(nodes[0].is_text());
        assert!(nodes[1].is_element());
        assert_eq!(nodes[3].text().to_string(), "d");
    }

    #[test]
    fn test_precedes() {
        let doc = parse(r#"<main><picture id="p"></picture><h1 id="h">T</h1></main>"#);
        let main = doc.select("main");
        assert!(precedes(&main, &doc.select("#p"), &doc.select("#h")));
        assert!(!precedes(&main, &doc.select("#h"), &doc.select("#p")));
    }

    #[test]
    fn test_element_html_escapes_attributes() {
        assert_eq!(
            element_html("img", &[("alt", "a \"b\"")], ""),
            r#"<img alt="a &quot;b&quot;">"#
        );
        assert_eq!(element_html("div", &[("class", "x")], "<p>y</p>"), r#"<div class="x"><p>y</p></div>"#);
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("<b>&"), "&lt;b&gt;&amp;");
    }
}
