//! Heading level normalization.

use crate::dom::{self, Selection};
use crate::patterns::HEADINGS;

/// Pick the level a heading should be clamped to.
///
/// Searches toward `h1` first, then toward `h6`.
///
/// # Returns
/// * `None` if `level` is already allowed, or if no level is allowed at all
#[must_use]
pub fn target_level(level: u8, allowed: &[u8]) -> Option<u8> {
    if allowed.contains(&level) {
        return None;
    }
    (1..level)
        .rev()
        .find(|l| allowed.contains(l))
        .or_else(|| (1..=6).find(|l| allowed.contains(l)))
}

fn parse_levels(allowed: &[String]) -> Vec<u8> {
    allowed
        .iter()
        .filter_map(|h| {
            let h = h.trim().to_ascii_lowercase();
            h.strip_prefix('h')?.parse::<u8>().ok()
        })
        .filter(|l| (1..=6).contains(l))
        .collect()
}

/// Normalize all headings within a container element.
///
/// A heading outside `allowed_headings` (`"h1"` … `"h6"`, any case) is
/// replaced by the nearest allowed level, keeping only its `id` and text.
/// An empty allowed set leaves every heading unchanged.
///
/// # Returns
/// Number of headings replaced.
pub fn normalize_headings(root: &Selection, allowed_headings: &[String]) -> usize {
    let allowed = parse_levels(allowed_headings);
    if allowed.is_empty() {
        return 0;
    }

    let mut replaced = 0;
    for heading in root.select(HEADINGS).iter() {
        let Some(level) = dom::tag_name(&heading)
            .and_then(|t| t.strip_prefix('h').and_then(|l| l.parse::<u8>().ok()))
        else {
            continue;
        };
        let Some(target) = target_level(level, &allowed) else {
            continue;
        };

        let tag = format!("h{target}");
        let id = heading.attr("id").map(|s| s.to_string());
        let attrs: Vec<(&str, &str)> = id.as_deref().map(|id| ("id", id)).into_iter().collect();
        let text = heading.text();
        heading.replace_with_html(dom::element_html(&tag, &attrs, &dom::escape(&text)));
        replaced += 1;
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    fn allowed(levels: &[&str]) -> Vec<String> {
        levels.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_target_level_promotes_first() {
        assert_eq!(target_level(4, &[2, 5]), Some(2));
        assert_eq!(target_level(3, &[1, 2, 3]), None);
    }

    #[test]
    fn test_target_level_demotes_when_nothing_above() {
        assert_eq!(target_level(1, &[3, 4]), Some(3));
        assert_eq!(target_level(2, &[5]), Some(5));
    }

    #[test]
    fn test_target_level_empty() {
        assert_eq!(target_level(3, &[]), None);
    }

    #[test]
    fn test_normalize_keeps_id_and_text() {
        let doc = parse(r#"<main><h4 id="intro" class="x">Hello <em>world</em> &amp; co</h4></main>"#);
        let count = normalize_headings(&doc.select("main"), &allowed(&["H2", "h3"]));
        assert_eq!(count, 1);
        let h = doc.select("h3");
        assert_eq!(h.attr("id").as_deref(), Some("intro"));
        assert_eq!(h.text().to_string(), "Hello world & co");
        assert!(h.attr("class").is_none());
        assert!(doc.select("h4").is_empty());
    }

    #[test]
    fn test_normalize_without_id() {
        let doc = parse("<main><h1>Top</h1></main>");
        normalize_headings(&doc.select("main"), &allowed(&["h2"]));
        assert!(doc.select("h2").attr("id").is_none());
        assert_eq!(doc.select("h2").text().to_string(), "Top");
    }

    #[test]
    fn test_normalize_empty_allowed_is_noop() {
        let doc = parse("<main><h5>Deep</h5></main>");
        assert_eq!(normalize_headings(&doc.select("main"), &[]), 0);
        assert_eq!(doc.select("h5").length(), 1);
    }
}
