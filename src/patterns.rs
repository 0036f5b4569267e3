//! Compiled regex patterns and CSS selectors used during decoration.
//!
//! All patterns are compiled once using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Name Sanitization
// =============================================================================

/// Any character that may not appear in a generated class name.
pub static NON_CLASS_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-z]").expect("NON_CLASS_CHAR regex"));

/// A stray hyphen (with optional leading whitespace) at the start of a block
/// name segment, or one (with optional trailing whitespace) at the end.
pub static EDGE_DASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^\s*-)|(-\s*$)").expect("EDGE_DASHES regex"));

/// Runs of two hyphens, collapsed when deriving `*-container` classes.
pub static DOUBLE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--").expect("DOUBLE_DASH regex"));

// =============================================================================
// Selectors
// =============================================================================

/// Every heading element.
pub const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

/// Images served from the media bus, which get optimized pictures.
pub const MEDIA_IMAGES: &str = r#"img[src*="/media_"]"#;

/// The section metadata table lifted into section attributes.
pub const SECTION_METADATA: &str = "div.section-metadata";

/// Blocks still waiting to finish loading.
pub const PENDING_BLOCKS: &str =
    r#".block[data-block-status="initialized"], .block[data-block-status="loading"]"#;

/// The loader script whose location defines the code base path.
pub const LOADER_SCRIPT: &str = r#"script[src$="/scripts.js"]"#;

/// Sanitize a name for use as a class name.
///
/// Lowercases and replaces every character outside `[0-9a-z]` with `-`.
///
/// # Example
///
/// ```rust
/// use page_decorator::to_class_name;
///
/// assert_eq!(to_class_name("Dark Blue"), "dark-blue");
/// ```
#[must_use]
pub fn to_class_name(name: &str) -> String {
    NON_CLASS_CHAR
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Remove one stray hyphen from each end of a block name segment.
#[must_use]
pub fn trim_dashes(segment: &str) -> String {
    EDGE_DASHES.replace_all(segment, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_class_name() {
        assert_eq!(to_class_name("Style"), "style");
        assert_eq!(to_class_name("Background Image"), "background-image");
        assert_eq!(to_class_name("a_b.c"), "a-b-c");
        assert_eq!(to_class_name(""), "");
    }

    #[test]
    fn test_to_class_name_non_ascii() {
        assert_eq!(to_class_name("Café"), "caf-");
    }

    #[test]
    fn test_trim_dashes() {
        assert_eq!(trim_dashes("-cards-"), "cards");
        assert_eq!(trim_dashes("cards"), "cards");
        assert_eq!(trim_dashes(" -wide"), "wide");
        assert_eq!(trim_dashes("--x"), "-x");
    }

    #[test]
    fn test_double_dash() {
        assert_eq!(DOUBLE_DASH.replace_all("cards--wide-container", "-"), "cards-wide-container");
    }
}
