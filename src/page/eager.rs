//! Eager phase: everything needed to reach the largest contentful paint.

use log::debug;

use crate::decorate::{
    add_section_backgrounds, build_auto_blocks, decorate_blocks, decorate_sections, BLOCK_NAME,
};
use crate::dom::{self, Document, Selection};
use crate::loader::BlockOutcome;
use crate::normalize::{
    decorate_buttons, decorate_icons, decorate_pictures, make_links_relative, normalize_headings,
};
use crate::page::context::PageContext;
use crate::page::metadata::get_metadata;
use crate::page::PageDecorator;
use crate::patterns::to_class_name;

/// Class revealing the body once the critical path is done.
pub const APPEAR: &str = "appear";

impl PageDecorator {
    /// Decorate the main element: normalizers, auto-blocks, sections, blocks.
    pub fn decorate_main(&self, main: &Selection, context: &PageContext) {
        let opts = &self.options;
        let base = context.page_base();

        if opts.rewrite_links {
            make_links_relative(main, opts);
        }
        normalize_headings(main, &opts.allowed_headings);
        if opts.decorate_pictures {
            decorate_pictures(main, &opts.breakpoints, base);
        }
        if opts.decorate_buttons {
            decorate_buttons(main, &opts.no_button_blocks, base);
        }
        if opts.decorate_icons {
            decorate_icons(main, context.code_base_path(), base);
        }
        build_auto_blocks(main, opts);
        if opts.decorate_sections {
            decorate_sections(main);
        }
        let blocks = decorate_blocks(main);
        debug!("decorated {blocks} blocks");
        if opts.section_backgrounds {
            add_section_backgrounds(main, &opts.breakpoints, base);
        }
    }

    /// Load the LCP block (if the first block is one) and wait for the LCP
    /// image.
    ///
    /// The body is revealed between the two. The first image in `main` is
    /// switched to eager loading and awaited unless it is already complete;
    /// an image that fails to load still ends the wait.
    pub async fn wait_for_lcp(
        &self,
        doc: &Document,
        context: &PageContext,
    ) -> Option<BlockOutcome> {
        let block = doc.select(".block").first();
        let is_lcp = block
            .attr(BLOCK_NAME)
            .is_some_and(|name| self.options.lcp_blocks.iter().any(|b| b == &*name));
        let outcome = if is_lcp {
            self.loader(doc, context).load_block(&block, true).await
        } else {
            None
        };

        dom::add_class(&doc.select("body"), APPEAR);

        let candidate = doc.select("main img").first();
        if let Some(src) = candidate.attr("src") {
            if !self.resources.image_complete(&src) {
                candidate.set_attr("loading", "eager");
                if let Err(err) = self.resources.load_image(&src).await {
                    debug!("LCP candidate did not load: {err}");
                }
            }
        }
        outcome
    }

    /// Run the eager phase.
    ///
    /// # Returns
    /// The LCP block load, if one happened.
    pub async fn load_eager(&self, doc: &Document, context: &PageContext) -> Vec<BlockOutcome> {
        if self.options.apply_theme {
            if let Some(theme) = get_metadata(doc, "theme") {
                dom::add_class(&doc.select("body"), &to_class_name(&theme));
            }
        }

        let main = doc.select("main").first();
        if !main.exists() {
            debug!("no main element; skipping decoration");
            return Vec::new();
        }
        self.decorate_main(&main, context);
        self.wait_for_lcp(doc, context).await.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::decorate::{block_status, Status};
    use crate::error::{Error, Result};
    use crate::loader::{BlockRegistry, LocalFuture, ResourceLoader};
    use crate::options::Options;

    #[derive(Default)]
    struct RecordingResources {
        images: Rc<RefCell<Vec<String>>>,
    }

    impl ResourceLoader for RecordingResources {
        fn load_stylesheet<'a>(&'a self, _href: &'a str) -> LocalFuture<'a, Result<()>> {
            Box::pin(async { Ok(()) })
        }

        fn load_image<'a>(&'a self, src: &'a str) -> LocalFuture<'a, Result<()>> {
            self.images.borrow_mut().push(src.to_string());
            Box::pin(async move {
                Err(Error::ImageFailed {
                    src: src.to_string(),
                    reason: "decode".to_string(),
                })
            })
        }
    }

    const PAGE: &str = r#"<html><head><meta name="theme" content="Night Mode"></head><body><main>
        <div><div class="hero"><div><div><picture><img src="/media_hero.png"></picture></div></div></div></div>
        <div><h4>Deep</h4><div class="cards"><div><div>c</div></div></div></div>
    </main></body></html>"#;

    #[tokio::test]
    async fn test_eager_loads_lcp_block_and_waits_for_image() {
        let doc = Document::from(PAGE);
        let images = Rc::new(RefCell::new(Vec::new()));
        let resources = RecordingResources {
            images: Rc::clone(&images),
        };
        let mut registry = BlockRegistry::new();
        registry.register_fn("hero", |inv| {
            assert!(inv.eager);
            Ok(())
        });
        let options = Options {
            lcp_blocks: vec!["hero".to_string()],
            allowed_headings: vec!["h2".to_string(), "h3".to_string()],
            apply_theme: true,
            ..Options::default()
        };
        let decorator = PageDecorator::new(options)
            .with_registry(registry)
            .with_resources(resources);
        let context = PageContext::default();

        let outcomes = decorator.load_eager(&doc, &context).await;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].name, "hero");
        assert!(outcomes[0].decorated);

        let body = doc.select("body");
        assert!(dom::has_class(&body, APPEAR));
        assert!(dom::has_class(&body, "night-mode"));
        assert_eq!(block_status(&doc.select("div.hero")), Some(Status::Loaded));
        assert_eq!(block_status(&doc.select("div.cards")), Some(Status::Initialized));
        assert_eq!(doc.select("main img").attr("loading").as_deref(), Some("eager"));
        assert_eq!(*images.borrow(), vec!["/media_hero.png".to_string()]);
        assert!(doc.select("main h3").exists());
    }

    #[tokio::test]
    async fn test_non_lcp_first_block_not_loaded_early() {
        let doc = Document::from(PAGE);
        let decorator = PageDecorator::default();
        let context = PageContext::default();
        let outcomes = decorator.load_eager(&doc, &context).await;
        assert!(outcomes.is_empty());
        assert_eq!(block_status(&doc.select("div.hero")), Some(Status::Initialized));
        assert!(dom::has_class(&doc.select("body"), APPEAR));
        assert!(!dom::has_class(&doc.select("body"), "night-mode"));
    }

    #[tokio::test]
    async fn test_animation_is_an_lcp_block_by_default() {
        let doc = Document::from(
            r#"<html><head></head><body><main><div><div class="animation"><div><div>a</div></div></div></div></main></body></html>"#,
        );
        let outcomes = PageDecorator::default()
            .load_eager(&doc, &PageContext::default())
            .await;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].name, "animation");
        assert_eq!(block_status(&doc.select("div.animation")), Some(Status::Loaded));
    }

    #[tokio::test]
    async fn test_no_main_is_a_noop() {
        let doc = Document::from("<html><head></head><body><p>x</p></body></html>");
        let decorator = PageDecorator::default();
        let outcomes = decorator.load_eager(&doc, &PageContext::default()).await;
        assert!(outcomes.is_empty());
        assert!(!dom::has_class(&doc.select("body"), APPEAR));
    }
}
