//! External resource fetching.
//!
//! The decorator never performs I/O itself. Whoever drives it (a headless
//! renderer, a prerender service, a test) supplies a [`ResourceLoader`] that
//! reports when stylesheets and images finish loading.

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;

/// A boxed, non-`Send` future. DOM borrows are single-threaded.
pub type LocalFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Fetches stylesheets and images on behalf of the loader.
pub trait ResourceLoader {
    /// Resolve once the stylesheet at `href` has loaded or failed.
    fn load_stylesheet<'a>(&'a self, href: &'a str) -> LocalFuture<'a, Result<()>>;

    /// Resolve once the image at `src` has loaded or failed.
    fn load_image<'a>(&'a self, src: &'a str) -> LocalFuture<'a, Result<()>>;

    /// Whether the image at `src` is already decoded and needs no waiting.
    fn image_complete(&self, _src: &str) -> bool {
        false
    }
}

/// A loader for which every resource is immediately available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResources;

impl ResourceLoader for NoopResources {
    fn load_stylesheet<'a>(&'a self, _href: &'a str) -> LocalFuture<'a, Result<()>> {
        Box::pin(std::future::ready(Ok(())))
    }

    fn load_image<'a>(&'a self, _src: &'a str) -> LocalFuture<'a, Result<()>> {
        Box::pin(std::future::ready(Ok(())))
    }

    fn image_complete(&self, _src: &str) -> bool {
        true
    }
}
