//! Section decoration.

use log::debug;

use crate::decorate::config::{read_block_config, ConfigValue};
use crate::decorate::status::{set_section_status, Status};
use crate::dom::{self, Selection};
use crate::patterns::{to_class_name, SECTION_METADATA};

/// Group a section's children into content wrappers.
///
/// Every `div` (a block) starts its own group; a run of default content
/// (other elements and non-blank text) shares one group.
fn content_groups(section: &Selection) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    let mut default_content = false;
    for node in dom::child_nodes(section) {
        let (is_div, html) = if node.is_element() {
            let child = Selection::from(node);
            (dom::is_tag(&child, "div"), child.html().to_string())
        } else if node.is_text() {
            let text = node.text();
            if text.trim().is_empty() {
                continue;
            }
            (false, dom::escape(&text).into_owned())
        } else {
            continue;
        };
        if is_div || !default_content {
            groups.push(String::new());
            default_content = !is_div;
        }
        if let Some(group) = groups.last_mut() {
            group.push_str(&html);
        }
    }
    groups
}

/// Lift the `section-metadata` table into section attributes.
///
/// `style` values become classes; every other key becomes `data-<key>`.
fn apply_section_metadata(section: &Selection) {
    let meta = section.select(SECTION_METADATA).first();
    if !meta.exists() {
        return;
    }
    for (key, value) in read_block_config(&meta) {
        if key == "style" {
            for style in value.values() {
                dom::add_class(section, &to_class_name(style));
            }
        } else if !key.is_empty() {
            let value = match &value {
                ConfigValue::Text(s) => s.clone(),
                ConfigValue::List(_) => value.to_string(),
            };
            section.set_attr(&format!("data-{key}"), &value);
        }
    }
    meta.remove();
}

/// Decorate all sections in a container element.
///
/// Each direct `div` child becomes a `section`: its children are regrouped
/// into wrapper `div`s, it is marked `initialized`, and its metadata table
/// is lifted into attributes.
///
/// # Returns
/// Number of sections decorated.
pub fn decorate_sections(main: &Selection) -> usize {
    let mut count = 0;
    for section in dom::element_children(main) {
        if !dom::is_tag(&section, "div") {
            continue;
        }
        let groups = content_groups(&section);
        let wrapped: String = groups
            .iter()
            .map(|inner| format!("<div>{inner}</div>"))
            .collect();
        section.set_html(wrapped);

        dom::add_class(&section, "section");
        set_section_status(&section, Status::Initialized);
        apply_section_metadata(&section);
        count += 1;
    }
    debug!("decorated {count} sections");
    count
}
