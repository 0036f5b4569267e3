//! Markup normalizers.
//!
//! Pure tree-to-tree passes run before sections and blocks are classified.
//!
//! # Module Structure
//!
//! - `links`: absolute-to-relative link rewriting with legacy path fixes
//! - `headings`: clamping headings to an allowed level set
//! - `picture`: responsive `<picture>` generation for media images
//! - `buttons`: button-class inference for standalone links
//! - `icons`: rebasing icon sources onto the code base path

pub mod buttons;
pub mod headings;
pub mod icons;
pub mod links;
pub mod picture;

pub use buttons::decorate_buttons;
pub use headings::normalize_headings;
pub use icons::decorate_icons;
pub use links::{make_links_relative, rewrite_href};
pub use picture::{create_optimized_picture, decorate_pictures, OptimizedPicture};
