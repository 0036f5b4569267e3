//! # page-decorator
//!
//! Server-side decoration of authored content pages.
//!
//! Authored pages arrive as plain markup: a `<main>` whose child `div`s are
//! sections, whose child `div`s are blocks. This crate normalizes that
//! markup, classifies sections and blocks, and loads each block's stylesheet
//! and behavior in a fixed eager / lazy / delayed sequence.
//!
//! ## Quick Start
//!
//! ```rust
//! use page_decorator::{BlockRegistry, Options, PageDecorator};
//!
//! let html = r#"<html><head></head><body><main>
//!     <div><div class="columns--wide"><div><div>One</div><div>Two</div></div></div></div>
//! </main></body></html>"#;
//!
//! let mut registry = BlockRegistry::new();
//! registry.register_fn("columns", |inv| {
//!     inv.block.set_attr("data-cols", "2");
//!     Ok(())
//! });
//!
//! let decorator = PageDecorator::new(Options::default()).with_registry(registry);
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()?;
//! let out = runtime.block_on(decorator.decorate_html(html));
//! assert!(out.contains(r#"class="columns wide block""#));
//! assert!(out.contains(r#"data-cols="2""#));
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Markup normalization**: link rewriting, heading clamping, optimized
//!   pictures, button inference, icon paths
//! - **Sections and blocks**: grouping, metadata lifting, variant classes,
//!   tabular block config
//! - **Block loading**: per-block status tracking with stylesheet and
//!   behavior loaded concurrently
//! - **Page phases**: LCP-first eager loading, ordered lazy loading, delayed
//!   third-party tags

mod error;
mod options;
mod patterns;

/// DOM helpers over `dom_query` (classes, attributes, navigation, markup).
pub mod dom;

/// URL resolution and path utilities.
pub mod url_utils;

/// Pure DOM-to-DOM transforms on authored markup.
pub mod normalize;

/// Section and block classification, block config and auto-blocks.
pub mod decorate;

/// Block registry, resource loading and per-block load sequencing.
pub mod loader;

/// Page context and the eager, lazy and delayed phases.
pub mod page;

// Public API - re-exports
pub use decorate::Status;
pub use error::{Error, Result};
pub use loader::{BlockDecorator, BlockInvocation, BlockRegistry, NoopResources, ResourceLoader};
pub use options::{Breakpoint, DelayedOptions, Options, PathRewrite};
pub use page::{PageContext, PageDecorator, PageReport};
pub use patterns::to_class_name;

/// Decorate a page with the given options, an empty registry and no-op
/// resources.
///
/// Runs the full pipeline on a current-thread runtime and returns the
/// decorated markup.
///
/// # Errors
///
/// Returns `Error::Config` if the runtime cannot be created.
pub fn decorate_page(html: &str, options: Options) -> Result<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|err| Error::Config(format!("cannot start runtime: {err}")))?;
    Ok(runtime.block_on(PageDecorator::new(options).decorate_html(html)))
}
