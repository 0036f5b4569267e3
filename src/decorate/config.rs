//! Block configuration tables.
//!
//! Authors configure blocks (and sections, via `section-metadata`) with a
//! two-column table: the first cell names the key, the second holds the
//! value as links, paragraphs, an image or plain text.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom::{self, Selection};
use crate::patterns::to_class_name;
use crate::url_utils;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// One link, paragraph, image source or plain text.
    Text(String),
    /// Several links or paragraphs.
    List(Vec<String>),
}

impl ConfigValue {
    /// The single value, or `None` for lists.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// All values, a single value becoming a one-element list.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Text(s) => vec![s.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Mapping from sanitized key to value.
pub type BlockConfig = BTreeMap<String, ConfigValue>;

fn one_or_many(mut values: Vec<String>) -> ConfigValue {
    if values.len() == 1 {
        ConfigValue::Text(values.remove(0))
    } else {
        ConfigValue::List(values)
    }
}

fn cell_value(cell: &Selection, base: Option<&Url>) -> ConfigValue {
    let links = cell.select("a");
    if links.exists() {
        return one_or_many(
            links
                .iter()
                .map(|a| {
                    a.attr("href")
                        .map(|h| url_utils::absolute_href(&h, base))
                        .unwrap_or_default()
                })
                .collect(),
        );
    }
    let paragraphs = cell.select("p");
    if paragraphs.exists() {
        return one_or_many(paragraphs.iter().map(|p| dom::trimmed_text(&p)).collect());
    }
    let img = cell.select("img").first();
    if img.exists() {
        return ConfigValue::Text(img.attr("src").map(|s| s.to_string()).unwrap_or_default());
    }
    ConfigValue::Text(dom::trimmed_text(cell))
}

/// Extract the config from a block.
///
/// Each direct `div` row with at least two cells contributes one entry; the
/// key is the sanitized text of the first cell. Later rows with the same key
/// win.
#[must_use]
pub fn read_block_config(block: &Selection) -> BlockConfig {
    read_block_config_with_base(block, None)
}

/// Extract the config from a block, resolving link values against the page
/// URL.
#[must_use]
pub fn read_block_config_with_base(block: &Selection, base: Option<&Url>) -> BlockConfig {
    let mut config = BlockConfig::new();
    for row in dom::element_children(block) {
        if !dom::is_tag(&row, "div") {
            continue;
        }
        let cols = dom::element_children(&row);
        let [key, value, ..] = cols.as_slice() else {
            continue;
        };
        config.insert(to_class_name(&dom::trimmed_text(key)), cell_value(value, base));
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn test_value_precedence() {
        let doc = parse(
            r#"<div class="cfg">
                <div><div>Link</div><div><p><a href="/a">A</a></p></div></div>
                <div><div>Links</div><div><a href="/a">A</a> <a href="/b">B</a></div></div>
                <div><div>Para</div><div><p> one </p></div></div>
                <div><div>Paras</div><div><p>one</p><p>two</p></div></div>
                <div><div>Image</div><div><picture><img src="/i.png"></picture></div></div>
                <div><div>Plain Text</div><div> hello </div></div>
                <div><div>single</div></div>
            </div>"#,
        );
        let config = read_block_config(&doc.select("div.cfg"));
        assert_eq!(config["link"], ConfigValue::Text("/a".to_string()));
        assert_eq!(
            config["links"],
            ConfigValue::List(vec!["/a".to_string(), "/b".to_string()])
        );
        assert_eq!(config["para"].as_text(), Some("one"));
        assert_eq!(config["paras"].values(), vec!["one", "two"]);
        assert_eq!(config["image"].as_text(), Some("/i.png"));
        assert_eq!(config["plain-text"].as_text(), Some("hello"));
        assert!(!config.contains_key("single"));
        assert_eq!(config.len(), 6);
    }

    #[test]
    fn test_links_resolve_against_page_url() {
        let doc = parse(
            r#"<div class="cfg">
                <div><div>Source</div><div><a href="data/feed.json">feed</a></div></div>
                <div><div>Home</div><div><a href="https://other.test/">x</a></div></div>
            </div>"#,
        );
        let base = Url::parse("https://site.hlx.page/en/news").expect("base");
        let config = read_block_config_with_base(&doc.select("div.cfg"), Some(&base));
        assert_eq!(
            config["source"].as_text(),
            Some("https://site.hlx.page/en/data/feed.json")
        );
        assert_eq!(config["home"].as_text(), Some("https://other.test/"));
        let raw = read_block_config(&doc.select("div.cfg"));
        assert_eq!(raw["source"].as_text(), Some("data/feed.json"));
    }

    #[test]
    fn test_display_and_json() {
        let list = ConfigValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.to_string(), "a,b");
        let json = serde_json::to_string(&list).expect("serialize");
        assert_eq!(json, r#"["a","b"]"#);
        let text: ConfigValue = serde_json::from_str(r#""x""#).expect("deserialize");
        assert_eq!(text, ConfigValue::Text("x".to_string()));
    }
}
