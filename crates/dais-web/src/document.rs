//! `Dom` over the browser document

use dais_core::{Clock, Dom};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

/// The page's `window` and `document`
pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// Handles for the current global window, if running in a page
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self::new(window, document))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for WebDocument {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn elements_by_class(&self, class: &str) -> Vec<Element> {
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length())
            .filter_map(|index| collection.item(index))
            .collect()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(|body| body.unchecked_into::<Element>())
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn data_attr(&self, node: &Element, key: &str) -> Option<String> {
        node.get_attribute(&format!("data-{key}"))
            .filter(|value| !value.is_empty())
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = element.style();
        let _ = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn closest_tag(&self, node: &Element, tag: &str) -> Option<Element> {
        node.closest(tag).ok().flatten()
    }

    fn scroll_top(&self) -> f64 {
        self.window.page_y_offset().ok().filter(|offset| *offset > 0.0).unwrap_or_else(|| {
            self.document
                .document_element()
                .map(|root| root.scroll_top() as f64)
                .unwrap_or(0.0)
        })
    }

    fn navigate(&mut self, href: &str) {
        if let Err(err) = self.window.location().set_href(href) {
            tracing::warn!("Navigation to {} failed: {:?}", href, err);
        }
    }
}

/// `Date.now()`
#[derive(Clone, Copy, Debug, Default)]
pub struct WebClock;

impl Clock for WebClock {
    fn now_millis(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}
