//! Page orchestration.
//!
//! Decoration runs in three phases, each finished before the next starts:
//!
//! 1. **Eager** (`eager`): normalize and classify the main content, load the
//!    LCP block if there is one, reveal the body and wait for the first image.
//! 2. **Lazy** (`lazy`): load every remaining block in document order, then
//!    the header and footer, then non-critical styles and the favicon.
//! 3. **Delayed** (`delayed`): after a pause, inject third-party tags.
//!
//! # Module Structure
//!
//! - `context`: `PageContext`, the page-wide state threaded through loading
//! - `metadata`: `<meta>` lookup
//! - `eager`, `lazy`, `delayed`: the phases, as methods on [`PageDecorator`]

pub mod context;
pub mod delayed;
pub mod eager;
pub mod lazy;
pub mod metadata;

use log::debug;

use crate::dom::Document;
use crate::loader::{BlockLoader, BlockOutcome, BlockRegistry, NoopResources, ResourceLoader};
use crate::options::Options;

pub use context::{Dependencies, PageContext};
pub use metadata::get_metadata;

/// Result of decorating a page.
#[derive(Debug)]
pub struct PageReport {
    /// The context the page was decorated with, including any publish
    /// dependencies added by blocks.
    pub context: PageContext,
    /// Every block load, in the order blocks finished.
    pub blocks: Vec<BlockOutcome>,
    /// Whether the delayed phase injected its tags.
    pub delayed: bool,
}

/// Decorates documents using a fixed configuration, block registry and
/// resource loader.
///
/// # Example
///
/// ```rust
/// use page_decorator::PageDecorator;
///
/// let html = r#"<html><head></head><body><header></header><main>
///     <div><div class="cards"><div><div>Card</div></div></div></div>
/// </main></body></html>"#;
///
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .enable_time()
///     .build()?;
/// let out = runtime.block_on(PageDecorator::default().decorate_html(html));
/// assert!(out.contains(r#"data-block-status="loaded""#));
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct PageDecorator {
    options: Options,
    registry: BlockRegistry,
    resources: Box<dyn ResourceLoader>,
}

impl Default for PageDecorator {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl PageDecorator {
    /// Decorator with an empty registry and no-op resources.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            registry: BlockRegistry::new(),
            resources: Box::new(NoopResources),
        }
    }

    /// Use the given block registry.
    #[must_use]
    pub fn with_registry(mut self, registry: BlockRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Use the given resource loader.
    #[must_use]
    pub fn with_resources(mut self, resources: impl ResourceLoader + 'static) -> Self {
        self.resources = Box::new(resources);
        self
    }

    /// The options in use.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The block registry in use.
    #[must_use]
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// A block loader bound to one document and context.
    #[must_use]
    pub fn loader<'a>(&'a self, doc: &'a Document, context: &'a PageContext) -> BlockLoader<'a> {
        BlockLoader {
            document: doc,
            registry: &self.registry,
            resources: self.resources.as_ref(),
            context,
        }
    }

    /// Decorate the page: eager, then lazy, then delayed.
    pub async fn load_page(&self, doc: &Document) -> PageReport {
        let context = PageContext::from_document(doc, &self.options);
        let mut blocks = self.load_eager(doc, &context).await;
        blocks.extend(self.load_lazy(doc, &context).await);
        let delayed = self.load_delayed(doc).await;
        debug!("page decorated: {} blocks loaded", blocks.len());
        PageReport {
            context,
            blocks,
            delayed,
        }
    }

    /// Parse, decorate and serialize a page.
    pub async fn decorate_html(&self, html: &str) -> String {
        let doc = Document::from(html);
        self.load_page(&doc).await;
        doc.html().to_string()
    }
}
