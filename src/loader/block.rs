//! Per-block loading.
//!
//! A block moves `initialized → loading → loaded` exactly once. While
//! loading, its stylesheet and its behavior run concurrently; the block is
//! marked `loaded` when both have finished, whether or not either failed.

use log::{debug, warn};

use crate::decorate::block::BLOCK_NAME;
use crate::decorate::status::{block_status, set_block_status, update_sections_status, Status};
use crate::dom::{Document, Selection};
use crate::error::Error;
use crate::loader::registry::{BlockInvocation, BlockRegistry};
use crate::loader::resources::ResourceLoader;
use crate::loader::stylesheet::{load_css, StylesheetStatus};
use crate::page::context::PageContext;

/// What happened when a block was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    /// Canonical block name.
    pub name: String,
    /// How the block stylesheet resolved.
    pub stylesheet: StylesheetStatus,
    /// Whether the block behavior ran without error.
    pub decorated: bool,
}

/// Stylesheet path for a block, by convention
/// `<code base>/blocks/<name>/<name>.css`.
#[must_use]
pub fn block_stylesheet(code_base_path: &str, name: &str) -> String {
    format!("{code_base_path}/blocks/{name}/{name}.css")
}

/// Loads block styles and behaviors for one document.
pub struct BlockLoader<'a> {
    /// The document being decorated.
    pub document: &'a Document,
    /// Behaviors by block name.
    pub registry: &'a BlockRegistry,
    /// Stylesheet and image fetching.
    pub resources: &'a dyn ResourceLoader,
    /// Page-wide context.
    pub context: &'a PageContext,
}

impl<'a> BlockLoader<'a> {
    async fn run_behavior(&self, block: &Selection<'a>, name: &str, eager: bool) -> bool {
        let Some(decorator) = self.registry.get(name) else {
            warn!(
                "failed to load module for {name}: {}",
                Error::BlockNotRegistered(name.to_string())
            );
            return false;
        };
        let invocation = BlockInvocation {
            block: block.clone(),
            name,
            document: self.document,
            eager,
            context: self.context,
        };
        match decorator.decorate(&invocation).await {
            Ok(()) => true,
            Err(err) => {
                warn!("failed to load module for {name}: {err}");
                false
            }
        }
    }

    /// Load styles and behavior for a block.
    ///
    /// # Returns
    /// `None` if the block is already loading or loaded (nothing is done).
    pub async fn load_block(&self, block: &Selection<'a>, eager: bool) -> Option<BlockOutcome> {
        if matches!(block_status(block), Some(Status::Loading | Status::Loaded)) {
            return None;
        }
        set_block_status(block, Status::Loading);

        let name = block
            .attr(BLOCK_NAME)
            .map(|s| s.to_string())
            .unwrap_or_default();
        let href = block_stylesheet(self.context.code_base_path(), &name);

        let (stylesheet, decorated) = tokio::join!(
            load_css(self.document, &href, self.resources),
            self.run_behavior(block, &name, eager),
        );

        set_block_status(block, Status::Loaded);
        debug!("block {name} loaded");
        Some(BlockOutcome {
            name,
            stylesheet,
            decorated,
        })
    }

    /// Load all blocks in a container element.
    ///
    /// Blocks load one at a time in document order, and section statuses are
    /// refreshed after each one so sections become `loaded` in order.
    pub async fn load_blocks(&self, main: &Selection<'a>) -> Vec<BlockOutcome> {
        update_sections_status(main);
        let blocks: Vec<Selection<'a>> = main.select("div.block").iter().collect();
        let mut outcomes = Vec::with_capacity(blocks.len());
        for block in &blocks {
            if let Some(outcome) = self.load_block(block, false).await {
                outcomes.push(outcome);
            }
            update_sections_status(main);
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::decorate::{decorate_blocks, decorate_sections, section_status};
    use crate::dom::{self, parse};
    use crate::error::Error;
    use crate::loader::resources::NoopResources;

    const PAGE: &str = r#"<html><head></head><body><main>
        <div><div class="hero"><div><div>Hi</div></div></div></div>
        <div><p>text</p><div class="cards--wide"><div><div>c</div></div></div></div>
    </main></body></html>"#;

    #[tokio::test]
    async fn test_load_block_runs_behavior_and_stylesheet() {
        let doc = parse(PAGE);
        let main = doc.select("main");
        decorate_sections(&main);
        decorate_blocks(&main);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = BlockRegistry::new();
        let calls = Rc::clone(&seen);
        registry.register_fn("hero", move |inv| {
            calls.borrow_mut().push((inv.name.to_string(), inv.eager));
            inv.block.set_attr("data-touched", "yes");
            Ok(())
        });
        let context = PageContext::new("/code");
        let loader = BlockLoader {
            document: &doc,
            registry: &registry,
            resources: &NoopResources,
            context: &context,
        };

        let hero = doc.select("div.hero");
        let outcome = loader.load_block(&hero, true).await.expect("first load");
        assert_eq!(outcome.name, "hero");
        assert_eq!(outcome.stylesheet, StylesheetStatus::Loaded);
        assert!(outcome.decorated);
        assert_eq!(block_status(&hero), Some(Status::Loaded));
        assert_eq!(hero.attr("data-touched").as_deref(), Some("yes"));
        assert!(doc.select(r#"head link[href="/code/blocks/hero/hero.css"]"#).exists());

        assert!(loader.load_block(&hero, true).await.is_none());
        assert_eq!(*seen.borrow(), vec![("hero".to_string(), true)]);
    }

    #[tokio::test]
    async fn test_loading_block_is_not_reentered() {
        let doc = parse(PAGE);
        let main = doc.select("main");
        decorate_sections(&main);
        decorate_blocks(&main);
        let registry = BlockRegistry::new();
        let context = PageContext::default();
        let loader = BlockLoader {
            document: &doc,
            registry: &registry,
            resources: &NoopResources,
            context: &context,
        };
        let hero = doc.select("div.hero");
        set_block_status(&hero, Status::Loading);
        assert!(loader.load_block(&hero, false).await.is_none());
        assert_eq!(block_status(&hero), Some(Status::Loading));
        assert!(doc.select("head link").is_empty());
    }

    #[tokio::test]
    async fn test_failures_still_mark_loaded() {
        let doc = parse(PAGE);
        let main = doc.select("main");
        decorate_sections(&main);
        decorate_blocks(&main);
        let mut registry = BlockRegistry::new();
        registry.register_fn("cards", |inv| Err(Error::block(inv.name, "boom")));
        let context = PageContext::default();
        let loader = BlockLoader {
            document: &doc,
            registry: &registry,
            resources: &NoopResources,
            context: &context,
        };

        let outcomes = loader.load_blocks(&main).await;
        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["hero", "cards"]);
        assert!(outcomes.iter().all(|o| !o.decorated));
        assert!(doc
            .select("div.block")
            .iter()
            .all(|b| block_status(&b) == Some(Status::Loaded)));
        for section in main.select("div.section").iter() {
            assert_eq!(section_status(&section), Some(Status::Loaded));
        }
        assert!(dom::has_class(&doc.select("div.cards"), "wide"));
    }
}
