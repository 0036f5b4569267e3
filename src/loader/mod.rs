//! Block loading.
//!
//! # Module Structure
//!
//! - `resources`: the `ResourceLoader` seam for stylesheet and image fetches
//! - `stylesheet`: head `<link>` management for stylesheets and the favicon
//! - `registry`: block behaviors and the name → behavior registry
//! - `block`: the per-block load state machine and sequential page loading

pub mod block;
pub mod registry;
pub mod resources;
pub mod stylesheet;

pub use block::{block_stylesheet, BlockLoader, BlockOutcome};
pub use registry::{BlockDecorator, BlockInvocation, BlockRegistry, FnDecorator};
pub use resources::{LocalFuture, NoopResources, ResourceLoader};
pub use stylesheet::{add_fav_icon, load_css, StylesheetStatus};
