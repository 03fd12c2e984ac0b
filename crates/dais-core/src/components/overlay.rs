//! Background overlay reset
//!
//! The overlay stays fixed behind the page; any inline transform left over
//! from a parallax effect is cleared when the page attaches.

use crate::dom::Dom;

pub const OVERLAY_CLASS: &str = "background-overlay";

/// Clear the inline transform on the first overlay, if the page has one
pub fn reset_overlay<D: Dom>(doc: &mut D) -> bool {
    match doc.first_by_class(OVERLAY_CLASS) {
        Some(overlay) => {
            doc.set_style(&overlay, "transform", "");
            true
        }
        None => false,
    }
}
