//! Block classification and construction.
//!
//! A block's first class names it. `name--variant--other` declares variants,
//! which become extra classes; the canonical name is stored in
//! `data-block-name` and is what the loader looks up.

use crate::decorate::status::{set_block_status, Status};
use crate::dom::{self, Selection};
use crate::patterns::{trim_dashes, DOUBLE_DASH};

/// Attribute holding a block's canonical name.
pub const BLOCK_NAME: &str = "data-block-name";

/// Block cells inside decorated sections.
pub const SECTION_BLOCKS: &str = "div.section > div > div";

/// Split a raw block class into canonical name and variants.
///
/// # Example
///
/// ```rust
/// use page_decorator::decorate::block::parse_block_class;
///
/// let (name, variants) = parse_block_class("cards--highlight--wide");
/// assert_eq!(name, "cards");
/// assert_eq!(variants, vec!["highlight", "wide"]);
/// ```
#[must_use]
pub fn parse_block_class(raw: &str) -> (String, Vec<String>) {
    let mut segments = raw.split("--");
    let name = trim_dashes(segments.next().unwrap_or_default());
    let variants = segments
        .map(trim_dashes)
        .filter(|v| !v.is_empty())
        .collect();
    (name, variants)
}

/// Decorate a block.
///
/// Tags the block with its canonical name, variants and `block`, marks it
/// `initialized`, and adds `<name>-wrapper` to its parent and
/// `<name>-container` to its section.
///
/// # Returns
/// The canonical block name, or `None` if the element has no class.
pub fn decorate_block(block: &Selection) -> Option<String> {
    let classes = dom::class_list(block);
    let raw = classes.first()?.clone();
    let (name, variants) = parse_block_class(&raw);
    if name.is_empty() {
        return None;
    }

    if let Some(section) = dom::closest(block, ".section") {
        let container = format!("{raw}-container");
        dom::add_class(&section, &DOUBLE_DASH.replace_all(&container, "-"));
    }

    let mut updated: Vec<String> = Vec::with_capacity(classes.len() + variants.len() + 1);
    for class in std::iter::once(name.clone())
        .chain(variants)
        .chain(classes.into_iter().skip(1))
        .chain(std::iter::once("block".to_string()))
    {
        if !updated.contains(&class) {
            updated.push(class);
        }
    }
    block.set_attr("class", &updated.join(" "));
    block.set_attr(BLOCK_NAME, &name);
    set_block_status(block, Status::Initialized);

    if let Some(wrapper) = dom::parent_element(block) {
        dom::add_class(&wrapper, &format!("{name}-wrapper"));
    }
    Some(name)
}

/// Decorate all blocks in a container element.
///
/// # Returns
/// Number of blocks decorated.
pub fn decorate_blocks(main: &Selection) -> usize {
    main.select(SECTION_BLOCKS)
        .iter()
        .filter_map(|block| decorate_block(&block))
        .count()
}

/// Content for [`build_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    /// A single cell holding an HTML fragment.
    Cell(String),
    /// Rows of cells, each cell an HTML fragment.
    Table(Vec<Vec<String>>),
}

impl From<&str> for BlockContent {
    fn from(html: &str) -> Self {
        Self::Cell(html.to_string())
    }
}

impl From<Vec<Vec<String>>> for BlockContent {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::Table(rows)
    }
}

/// Build block markup from a two dimensional table of HTML fragments.
///
/// The result is an undecorated `<div class="name">` with one `div` per row
/// and one `div` per cell, the same shape authored blocks arrive in.
#[must_use]
pub fn build_block(name: &str, content: impl Into<BlockContent>) -> String {
    let rows = match content.into() {
        BlockContent::Cell(html) => vec![vec![html]],
        BlockContent::Table(rows) => rows,
    };
    let inner: String = rows
        .iter()
        .map(|row| {
            let cells: String = row.iter().map(|cell| format!("<div>{cell}</div>")).collect();
            format!("<div>{cells}</div>")
        })
        .collect();
    dom::element_html("div", &[("class", name)], &inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorate::section::decorate_sections;
    use crate::decorate::status::block_status;
    use crate::dom::parse;

    #[test]
    fn test_parse_block_class_trims_segments() {
        assert_eq!(parse_block_class("cards"), ("cards".to_string(), vec![]));
        assert_eq!(
            parse_block_class("-cards---wide-"),
            ("cards".to_string(), vec!["wide".to_string()])
        );
        assert_eq!(parse_block_class("cards--"), ("cards".to_string(), vec![]));
    }

    #[test]
    fn test_decorate_blocks_with_variants() {
        let doc = parse(
            r#"<main><div><div class="cards"></div><div class="cards--highlight"></div></div></main>"#,
        );
        let main = doc.select("main");
        decorate_sections(&main);
        assert_eq!(decorate_blocks(&main), 2);

        let blocks: Vec<_> = main.select("div.block").iter().collect();
        assert_eq!(dom::class_list(&blocks[0]), vec!["cards", "block"]);
        assert_eq!(dom::class_list(&blocks[1]), vec!["cards", "highlight", "block"]);
        for block in &blocks {
            assert_eq!(block.attr(BLOCK_NAME).as_deref(), Some("cards"));
            assert_eq!(block_status(block), Some(Status::Initialized));
            assert!(dom::has_class(&dom::parent_element(block).expect("wrapper"), "cards-wrapper"));
        }
        let section = main.select(".section");
        assert!(dom::has_class(&section, "cards-container"));
        assert!(dom::has_class(&section, "cards-highlight-container"));
    }

    #[test]
    fn test_extra_classes_kept() {
        let doc = parse(r#"<div class="section"><div><div class="columns--two dark"></div></div></div>"#);
        let block = doc.select("div.section > div > div");
        assert_eq!(decorate_block(&block).as_deref(), Some("columns"));
        assert_eq!(dom::class_list(&block), vec!["columns", "two", "dark", "block"]);
    }

    #[test]
    fn test_classless_block_skipped() {
        let doc = parse(r#"<div class="section"><div><div></div></div></div>"#);
        assert_eq!(decorate_blocks(&doc.select("body")), 0);
        assert!(doc.select("[data-block-status]").is_empty());
    }

    #[test]
    fn test_build_block() {
        assert_eq!(
            build_block("header", ""),
            r#"<div class="header"><div><div></div></div></div>"#
        );
        let table = vec![
            vec!["<p>a</p>".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ];
        assert_eq!(
            build_block("cards", table),
            r#"<div class="cards"><div><div><p>a</p></div><div>b</div></div><div><div>c</div></div></div>"#
        );
    }
}
