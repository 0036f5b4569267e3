//! Delayed phase: third-party tags that must not affect the experience.

use std::time::Duration;

use log::debug;

use crate::dom::{self, Document};
use crate::page::PageDecorator;

const TAG_MANAGER_URL: &str = "https://www.googletagmanager.com/gtm.js";

const DATA_LAYER_BOOTSTRAP: &str = "window.dataLayer=window.dataLayer||[];\
window.dataLayer.push({'gtm.start':new Date().getTime(),event:'gtm.js'});";

/// Markup for the tag manager bootstrap and loader scripts.
#[must_use]
pub fn tag_manager_snippet(id: &str) -> String {
    let src = format!("{TAG_MANAGER_URL}?id={id}");
    let mut out = dom::element_html("script", &[], DATA_LAYER_BOOTSTRAP);
    out.push_str(&dom::element_html(
        "script",
        &[("async", ""), ("src", &src)],
        "",
    ));
    out
}

/// Insert the tag manager snippet ahead of the first script in the
/// document, or at the end of `<head>` when there is none.
pub fn inject_tag_manager(doc: &Document, id: &str) {
    let snippet = tag_manager_snippet(id);
    let first = doc.select("script").first();
    if first.exists() {
        first.before_html(snippet);
    } else {
        doc.select("head").first().append_html(snippet);
    }
}

impl PageDecorator {
    /// Run the delayed phase.
    ///
    /// # Returns
    /// `true` if the phase ran (it is off unless enabled in the options).
    pub async fn load_delayed(&self, doc: &Document) -> bool {
        let delayed = &self.options.delayed;
        if !delayed.enabled {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(delayed.delay_ms)).await;
        match &delayed.tag_manager_id {
            Some(id) => {
                inject_tag_manager(doc, id);
                debug!("tag manager {id} injected");
            }
            None => debug!("delayed phase ran with nothing to inject"),
        }
        true
    }
}
