use folio_core::Document;

use crate::controller::{ScrollBehavior, ScrollController};

/// Smooth-scrolls so the element behind `href` (`"#contact"`) reaches the
/// top of the viewport.
///
/// Returns `false`, without scrolling, when nothing carries that anchor.
pub fn scroll_to_anchor(document: &Document, controller: &dyn ScrollController, href: &str) -> bool {
    let Some(target) = document.query_anchor(href) else {
        log::debug!("no section for anchor {href}");
        return false;
    };
    match document.frame(target) {
        Ok(frame) => {
            controller.scroll_to(frame.top(), ScrollBehavior::Smooth);
            true
        }
        Err(err) => {
            log::debug!("anchor {href} not laid out: {err}");
            false
        }
    }
}
