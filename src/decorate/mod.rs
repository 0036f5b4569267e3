//! Section and block decoration.
//!
//! # Module Structure
//!
//! - `section`: wrapping section content and lifting section metadata
//! - `block`: block naming, variants and synthetic block construction
//! - `config`: reading two-column configuration tables
//! - `status`: block/section readiness attributes and section promotion
//! - `auto`: auto-blocks and section background pictures

pub mod auto;
pub mod block;
pub mod config;
pub mod section;
pub mod status;

pub use auto::{add_section_backgrounds, build_auto_blocks, build_hero_block};
pub use block::{build_block, decorate_block, decorate_blocks, BlockContent, BLOCK_NAME};
pub use config::{read_block_config, read_block_config_with_base, BlockConfig, ConfigValue};
pub use section::decorate_sections;
pub use status::{block_status, section_status, update_sections_status, Status};
