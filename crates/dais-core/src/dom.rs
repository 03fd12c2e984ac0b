//! Document abstraction
//!
//! Page behaviors are written once against [`Dom`] and hosted either by the
//! in-memory [`HeadlessDocument`](crate::headless::HeadlessDocument) or by a
//! browser document in the `dais-web` crate.

use std::fmt::Debug;

/// The slice of a document that page behaviors read and mutate
///
/// Style properties use their CSS names (`box-shadow`, not `boxShadow`).
/// Setting a property to the empty string removes the inline value.
pub trait Dom {
    /// Handle to an element in this document
    type Node: Clone + PartialEq + Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All elements carrying `class`, in document order
    fn elements_by_class(&self, class: &str) -> Vec<Self::Node>;

    fn first_by_class(&self, class: &str) -> Option<Self::Node> {
        self.elements_by_class(class).into_iter().next()
    }

    fn body(&self) -> Option<Self::Node>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Value of `data-<key>`; an empty attribute counts as absent
    fn data_attr(&self, node: &Self::Node, key: &str) -> Option<String>;

    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);

    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Whether `node` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Nearest inclusive ancestor of `node` with the given tag name
    fn closest_tag(&self, node: &Self::Node, tag: &str) -> Option<Self::Node>;

    /// Current vertical scroll offset of the viewport
    fn scroll_top(&self) -> f64;

    /// Start a full page load of `href`
    fn navigate(&mut self, href: &str);
}
