//! Icon source rebasing.

use log::warn;
use url::Url;

use crate::dom::Selection;
use crate::url_utils;

/// Rebase `.icon` image sources onto the code base path, so icons are served
/// from the same location as the page code.
///
/// # Returns
/// Number of icons rebased.
pub fn decorate_icons(root: &Selection, code_base_path: &str, base: Option<&Url>) -> usize {
    let mut rebased = 0;
    for icon in root.select(".icon[src]").iter() {
        let Some(src) = icon.attr("src") else {
            continue;
        };
        match url_utils::pathname(&src, base) {
            Ok(path) => {
                icon.set_attr("src", &format!("{code_base_path}{path}"));
                rebased += 1;
            }
            Err(err) => warn!("icon left unmodified: {err}"),
        }
    }
    rebased
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn test_rebases_icon_paths() {
        let doc = parse(
            r#"<main>
                <img class="icon" id="a" src="https://cdn.test/icons/search.svg?v=2">
                <img class="icon" id="b" src="/icons/menu.svg">
                <img id="c" src="/icons/plain.svg">
            </main>"#,
        );
        assert_eq!(decorate_icons(&doc.select("main"), "/code", None), 2);
        assert_eq!(doc.select("#a").attr("src").as_deref(), Some("/code/icons/search.svg"));
        assert_eq!(doc.select("#b").attr("src").as_deref(), Some("/code/icons/menu.svg"));
        assert_eq!(doc.select("#c").attr("src").as_deref(), Some("/icons/plain.svg"));
    }
}
