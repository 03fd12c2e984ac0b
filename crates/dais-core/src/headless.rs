//! In-memory document
//!
//! A small element tree with just enough state for the page behaviors:
//! ids, classes, `data-*` attributes, inline styles, text, a scroll offset
//! and optional layout rectangles for intersection checks. Navigations are
//! recorded instead of performed.

use std::collections::BTreeMap;

use crate::components::reveal::Rect;
use crate::dom::Dom;

/// Handle to an element in a [`HeadlessDocument`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Description of an element to append
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    data: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    rect: Option<Rect>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set `data-<key>`
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Position within the document (not the viewport)
    pub fn rect(mut self, top: f64, height: f64) -> Self {
        self.rect = Some(Rect::new(top, height));
        self
    }
}

#[derive(Clone, Debug)]
struct Element {
    spec: ElementSpec,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Element tree rooted at `<body>`
#[derive(Clone, Debug)]
pub struct HeadlessDocument {
    elements: Vec<Element>,
    scroll_top: f64,
    viewport_height: f64,
    navigations: Vec<String>,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

    pub fn new() -> Self {
        Self {
            elements: vec![Element {
                spec: ElementSpec::new("body"),
                parent: None,
                children: Vec::new(),
            }],
            scroll_top: 0.0,
            viewport_height: Self::DEFAULT_VIEWPORT_HEIGHT,
            navigations: Vec::new(),
        }
    }

    /// The `<body>` element
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = NodeId(self.elements.len());
        self.elements.push(Element {
            spec,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.elements[parent.0].children.push(id);
        id
    }

    fn element(&self, node: NodeId) -> &Element {
        &self.elements[node.0]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.elements[node.0]
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).parent
    }

    /// `node` followed by each of its ancestors up to the body
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        std::iter::successors(Some(node), |current| self.parent(*current)).collect()
    }

    /// Every element in document (pre-)order
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.elements.len());
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.element(node).children.iter().rev().copied());
        }
        order
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.element(node).spec.tag
    }

    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.element(node).spec.id.as_deref()
    }

    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.element(node).spec.classes.iter().map(String::as_str).collect()
    }

    /// Inline style value; `None` when unset or cleared
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node).spec.style.get(property).map(String::as_str)
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.element(node).spec.text
    }

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.element(node).spec.rect
    }

    pub fn set_rect(&mut self, node: NodeId, top: f64, height: f64) {
        self.element_mut(node).spec.rect = Some(Rect::new(top, height));
    }

    /// Rectangle relative to the top of the viewport at the current scroll
    pub fn viewport_rect(&self, node: NodeId) -> Option<Rect> {
        self.rect(node)
            .map(|rect| Rect::new(rect.top - self.scroll_top, rect.height))
    }

    pub fn set_scroll_top(&mut self, offset: f64) {
        self.scroll_top = offset;
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Every navigation requested so far, oldest first
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// The most recent navigation target
    pub fn location(&self) -> Option<&str> {
        self.navigations.last().map(String::as_str)
    }

    /// Find an element by `#id`, `.class` or `.class[index]`
    pub fn select(&self, selector: &str) -> Option<NodeId> {
        if let Some(id) = selector.strip_prefix('#') {
            return self.element_by_id(id);
        }
        let class_part = selector.strip_prefix('.')?;
        let (class, index) = match class_part.split_once('[') {
            Some((class, rest)) => (class, rest.strip_suffix(']')?.trim().parse().ok()?),
            None => (class_part, 0usize),
        };
        self.elements_by_class(class).get(index).copied()
    }

    /// Short description such as `div#header.hidden`
    pub fn describe(&self, node: NodeId) -> String {
        let mut out = self.tag(node).to_string();
        if let Some(id) = self.id_of(node) {
            out.push('#');
            out.push_str(id);
        }
        for class in self.classes(node) {
            out.push('.');
            out.push_str(class);
        }
        out
    }
}

impl Dom for HeadlessDocument {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|node| self.id_of(*node) == Some(id))
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|node| self.has_class(node, class))
            .collect()
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.root())
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.element(*node).spec.classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.element_mut(*node).spec.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.element_mut(*node).spec.classes.retain(|c| c != class);
    }

    fn data_attr(&self, node: &NodeId, key: &str) -> Option<String> {
        self.element(*node)
            .spec
            .data
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        let style = &mut self.element_mut(*node).spec.style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        self.element_mut(*node).spec.text = text.to_string();
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.ancestors(*node).contains(ancestor)
    }

    fn closest_tag(&self, node: &NodeId, tag: &str) -> Option<NodeId> {
        self.ancestors(*node)
            .into_iter()
            .find(|candidate| self.tag(*candidate).eq_ignore_ascii_case(tag))
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn navigate(&mut self, href: &str) {
        self.navigations.push(href.to_string());
    }
}
