//! Lazy phase: everything that does not gate the first paint.

use log::debug;

use crate::decorate::{build_block, decorate_block};
use crate::dom::{self, Document};
use crate::loader::{add_fav_icon, load_css, BlockLoader, BlockOutcome};
use crate::page::context::PageContext;
use crate::page::PageDecorator;
use crate::url_utils::with_code_base;

/// Append a synthetic block named after a page region (`header`, `footer`)
/// to that region, decorate it and load it.
async fn load_region(doc: &Document, loader: &BlockLoader<'_>, region: &str) -> Option<BlockOutcome> {
    let container = doc.select(region).first();
    if !container.exists() {
        debug!("no <{region}> element; skipping {region} block");
        return None;
    }
    container.append_html(build_block(region, ""));
    let block = dom::element_children(&container).pop()?;
    decorate_block(&block)?;
    loader.load_block(&block, false).await
}

impl PageDecorator {
    /// Run the lazy phase.
    ///
    /// Blocks in `main` load strictly one after another in document order.
    /// Header and footer follow, then non-critical stylesheets and the
    /// favicon.
    pub async fn load_lazy(&self, doc: &Document, context: &PageContext) -> Vec<BlockOutcome> {
        let loader = self.loader(doc, context);
        let mut outcomes = Vec::new();

        let main = doc.select("main").first();
        if main.exists() {
            outcomes.extend(loader.load_blocks(&main).await);
        }

        if self.options.load_header {
            outcomes.extend(load_region(doc, &loader, "header").await);
        }
        if self.options.load_footer {
            outcomes.extend(load_region(doc, &loader, "footer").await);
        }

        for href in &self.options.lazy_stylesheets {
            let href = with_code_base(context.code_base_path(), href);
            load_css(doc, &href, self.resources.as_ref()).await;
        }
        if let Some(favicon) = &self.options.favicon {
            add_fav_icon(doc, &with_code_base(context.code_base_path(), favicon));
        }
        outcomes
    }
}
