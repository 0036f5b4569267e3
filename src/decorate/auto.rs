//! Auto-blocking and section backgrounds.
//!
//! Auto-blocks are synthesized from default content before sections are
//! decorated, so they flow through the normal section/block pipeline.

use log::{debug, error, warn};
use url::Url;

use crate::decorate::block::build_block;
use crate::dom::{self, Selection};
use crate::error::{Error, Result};
use crate::normalize::picture::create_optimized_picture;
use crate::options::{Breakpoint, Options};

/// Build a `hero` block from the first picture and `h1` when the picture
/// comes first, placing it in a new leading section.
///
/// # Returns
/// Whether a hero block was built.
pub fn build_hero_block(main: &Selection) -> Result<bool> {
    let h1 = main.select("h1").first();
    let picture = main.select("picture").first();
    if !h1.exists() || !picture.exists() || !dom::precedes(main, &picture, &h1) {
        return Ok(false);
    }
    if dom::closest(&h1, "picture").is_some() || picture.select("h1").exists() {
        return Err(Error::ParseError("hero picture and heading are nested".to_string()));
    }

    let cell = format!("{}{}", picture.html(), h1.html());
    picture.remove();
    h1.remove();
    main.prepend_html(format!("<div>{}</div>", build_block("hero", cell.as_str())));
    Ok(true)
}

/// Build all synthetic blocks in a container element.
///
/// Failures are logged and never stop the page from decorating.
pub fn build_auto_blocks(main: &Selection, options: &Options) {
    if options.build_hero_block {
        match build_hero_block(main) {
            Ok(true) => debug!("built hero block"),
            Ok(false) => {}
            Err(err) => error!("auto blocking failed: {err}"),
        }
    }
}

/// Prepend background pictures to sections carrying `data-background`.
///
/// # Returns
/// Number of sections given a background.
pub fn add_section_backgrounds(
    main: &Selection,
    breakpoints: &[Breakpoint],
    base: Option<&Url>,
) -> usize {
    let mut count = 0;
    for section in main.select(".section[data-background]").iter() {
        let Some(background) = section.attr("data-background") else {
            continue;
        };
        match create_optimized_picture(&background, "background image", true, breakpoints, base) {
            Ok(mut picture) => {
                picture.class = Some("section-background".to_string());
                dom::add_class(&section, "has-background");
                section.prepend_html(picture.to_html());
                count += 1;
            }
            Err(err) => warn!("section background skipped: {err}"),
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;
    use crate::options::default_breakpoints;

    #[test]
    fn test_hero_built_when_picture_precedes_heading() {
        let doc = parse(
            r#"<main><div><p><picture><img src="/media_a.png"></picture></p><h1>Title</h1><p>body</p></div></main>"#,
        );
        let main = doc.select("main");
        assert!(build_hero_block(&main).expect("hero"));
        let first = dom::element_children(&main).into_iter().next().expect("section");
        let hero = first.select("div.hero");
        assert!(hero.exists());
        assert!(hero.select("picture").exists());
        assert_eq!(hero.select("h1").text().to_string(), "Title");
        assert_eq!(main.select("h1").length(), 1);
    }

    #[test]
    fn test_no_hero_when_heading_first() {
        let doc = parse(r#"<main><div><h1>Title</h1><picture><img src="/a.png"></picture></div></main>"#);
        assert!(!build_hero_block(&doc.select("main")).expect("no hero"));
        assert!(doc.select(".hero").is_empty());
    }

    #[test]
    fn test_nested_heading_is_an_error() {
        let doc = parse(r#"<main><div><picture><h1>T</h1></picture></div></main>"#);
        let main = doc.select("main");
        assert!(matches!(build_hero_block(&main), Err(Error::ParseError(_))));
        assert!(doc.select(".hero").is_empty());
        assert!(doc.select("picture > h1").exists());

        let options = Options {
            build_hero_block: true,
            ..Options::default()
        };
        build_auto_blocks(&main, &options);
        assert!(doc.select(".hero").is_empty());
        assert_eq!(dom::element_children(&main).len(), 1);
    }

    #[test]
    fn test_auto_blocks_respect_option() {
        let html = r#"<main><div><picture></picture><h1>T</h1></div></main>"#;
        let doc = parse(html);
        build_auto_blocks(&doc.select("main"), &Options::default());
        assert!(doc.select(".hero").is_empty());

        let options = Options {
            build_hero_block: true,
            ..Options::default()
        };
        build_auto_blocks(&doc.select("main"), &options);
        assert!(doc.select(".hero").exists());
    }

    #[test]
    fn test_section_backgrounds() {
        let doc = parse(
            r#"<main><div class="section" data-background="/media_bg.jpg"><div></div></div><div class="section"></div></main>"#,
        );
        let count = add_section_backgrounds(&doc.select("main"), &default_breakpoints(), None);
        assert_eq!(count, 1);
        let section = doc.select(".has-background");
        assert_eq!(section.length(), 1);
        let picture = section.children().first();
        assert!(dom::has_class(&picture, "section-background"));
        let img = picture.select("img");
        assert_eq!(img.attr("alt").as_deref(), Some("background image"));
        assert_eq!(img.attr("loading").as_deref(), Some("eager"));
    }
}
