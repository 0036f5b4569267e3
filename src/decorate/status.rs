//! Block and section readiness tracking.
//!
//! Status lives in `data-block-status` / `data-section-status` attributes so
//! the decorated markup carries it and page styles can key off it.

use std::fmt;
use std::str::FromStr;

use crate::dom::{self, Selection};
use crate::patterns::PENDING_BLOCKS;

/// Attribute holding a block's status.
pub const BLOCK_STATUS: &str = "data-block-status";

/// Attribute holding a section's status.
pub const SECTION_STATUS: &str = "data-section-status";

/// Readiness of a block or section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    /// Classified, not yet loading.
    Initialized,
    /// Styles and behavior are being fetched.
    Loading,
    /// Done, successfully or not.
    Loaded,
}

impl Status {
    /// Attribute value for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initialized" => Ok(Self::Initialized),
            "loading" => Ok(Self::Loading),
            "loaded" => Ok(Self::Loaded),
            _ => Err(()),
        }
    }
}

fn read(sel: &Selection, attr: &str) -> Option<Status> {
    sel.attr(attr).and_then(|s| s.parse().ok())
}

/// Current status of a block, `None` if it was never decorated.
#[must_use]
pub fn block_status(block: &Selection) -> Option<Status> {
    read(block, BLOCK_STATUS)
}

/// Set a block's status.
pub fn set_block_status(block: &Selection, status: Status) {
    block.set_attr(BLOCK_STATUS, status.as_str());
}

/// Current status of a section, `None` if it was never decorated.
#[must_use]
pub fn section_status(section: &Selection) -> Option<Status> {
    read(section, SECTION_STATUS)
}

/// Set a section's status.
pub fn set_section_status(section: &Selection, status: Status) {
    section.set_attr(SECTION_STATUS, status.as_str());
}

/// Direct `div.section` children of a container, in document order.
#[must_use]
pub fn sections<'a>(main: &Selection<'a>) -> Vec<Selection<'a>> {
    dom::element_children(main)
        .into_iter()
        .filter(|s| s.is("div.section"))
        .collect()
}

/// Update all section statuses in a container element.
///
/// Sections are scanned in order. A section that still holds an initialized
/// or loading block becomes `loading` and stops the scan, so a later section
/// can never be marked `loaded` before an earlier one. Sections without
/// pending blocks become `loaded`.
pub fn update_sections_status(main: &Selection) {
    for section in sections(main) {
        if section_status(&section) == Some(Status::Loaded) {
            continue;
        }
        if section.select(PENDING_BLOCKS).exists() {
            set_section_status(&section, Status::Loading);
            break;
        }
        set_section_status(&section, Status::Loaded);
    }
}
