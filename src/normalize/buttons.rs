//! Button inference for standalone links.
//!
//! A link that is the only child of its paragraph becomes a button. Wrapping
//! it in `<strong>` keeps the accent style; `<em>` selects the light variant.

use url::Url;

use crate::dom::{self, Selection};
use crate::url_utils;

const BLOCK_CELL: &str = "div.section > div > div";

fn is_alone_in(sel: &Selection, tags: &[&str]) -> bool {
    dom::child_node_count(sel) == 1 && tags.iter().any(|t| dom::is_tag(sel, t))
}

/// Decorate standalone links as buttons.
///
/// Every link gets a `title` (its text) if it has none. Links inside blocks
/// whose classes appear in `no_button_blocks`, links whose text is their own
/// href (resolved against `base` when given), and links wrapping images are
/// never made into buttons.
///
/// # Returns
/// Number of links turned into buttons.
pub fn decorate_buttons(root: &Selection, no_button_blocks: &[String], base: Option<&Url>) -> usize {
    let mut buttons = 0;
    for a in root.select("a").iter() {
        let text = a.text().to_string();
        if a.attr("title").is_none_or(|t| t.is_empty()) {
            a.set_attr("title", &text);
        }

        let excluded = dom::closest(&a, BLOCK_CELL).is_some_and(|block| {
            dom::class_list(&block)
                .iter()
                .any(|c| no_button_blocks.contains(c))
        });
        let href_is_text = a
            .attr("href")
            .is_some_and(|href| url_utils::absolute_href(&href, base) == text);
        if excluded || href_is_text {
            continue;
        }
        if a.select("img").exists() {
            continue;
        }

        let Some(up) = dom::parent_element(&a) else {
            continue;
        };
        let twoup = dom::parent_element(&up);

        if is_alone_in(&up, &["p", "div"]) {
            a.set_attr("class", "button accent");
            dom::add_class(&up, "button-container");
            buttons += 1;
            continue;
        }
        let Some(twoup) = twoup.filter(|t| is_alone_in(t, &["p"])) else {
            continue;
        };
        if is_alone_in(&up, &["strong"]) {
            a.set_attr("class", "button accent");
            dom::add_class(&twoup, "button-container");
            buttons += 1;
        } else if is_alone_in(&up, &["em"]) {
            a.set_attr("class", "button accent light");
            dom::add_class(&twoup, "button-container");
            buttons += 1;
        }
    }
    buttons
}
