//! Block behaviors and the registry mapping block names to them.

use std::collections::HashMap;
use std::fmt;

use crate::dom::{Document, Selection};
use crate::error::Result;
use crate::loader::resources::LocalFuture;
use crate::page::context::PageContext;

/// Everything a block behavior is invoked with.
pub struct BlockInvocation<'a> {
    /// The block element.
    pub block: Selection<'a>,
    /// Canonical block name.
    pub name: &'a str,
    /// The document being decorated.
    pub document: &'a Document,
    /// Whether the block is on the critical path (the LCP block).
    pub eager: bool,
    /// Page-wide context (code base path, publish dependencies).
    pub context: &'a PageContext,
}

/// The decoration entry point of a block.
pub trait BlockDecorator {
    /// Decorate the block. Errors are logged by the loader and never stop
    /// the block from reaching `loaded`.
    fn decorate<'a>(&'a self, invocation: &'a BlockInvocation<'a>) -> LocalFuture<'a, Result<()>>;
}

/// Adapts a synchronous closure into a [`BlockDecorator`].
pub struct FnDecorator<F>(pub F);

impl<F> BlockDecorator for FnDecorator<F>
where
    F: Fn(&BlockInvocation<'_>) -> Result<()>,
{
    fn decorate<'a>(&'a self, invocation: &'a BlockInvocation<'a>) -> LocalFuture<'a, Result<()>> {
        Box::pin(std::future::ready((self.0)(invocation)))
    }
}

/// Name → behavior map, populated at startup.
#[derive(Default)]
pub struct BlockRegistry {
    decorators: HashMap<String, Box<dyn BlockDecorator>>,
}

impl BlockRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a behavior, replacing any previous one for the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        decorator: impl BlockDecorator + 'static,
    ) -> &mut Self {
        self.decorators.insert(name.into(), Box::new(decorator));
        self
    }

    /// Register a synchronous closure as a behavior.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&BlockInvocation<'_>) -> Result<()> + 'static,
    {
        self.register(name, FnDecorator(f))
    }

    /// Look up the behavior for a block name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn BlockDecorator> {
        self.decorators.get(name).map(|d| &**d)
    }

    /// Whether a behavior is registered for the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.decorators.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.decorators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("blocks", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = BlockRegistry::new();
        registry
            .register_fn("cards", |_| Ok(()))
            .register_fn("hero", |_| Ok(()));
        assert!(registry.contains("cards"));
        assert!(registry.get("hero").is_some());
        assert!(registry.get("columns").is_none());
        assert_eq!(registry.names(), vec!["cards", "hero"]);
        assert_eq!(format!("{registry:?}"), r#"BlockRegistry { blocks: ["cards", "hero"] }"#);
    }
}
