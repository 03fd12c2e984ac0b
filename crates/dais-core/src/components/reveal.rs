//! Reveal-on-scroll Animator
//!
//! Committee cards get the `animate` class the first time enough of them is
//! on screen. The flag is one-way.

use crate::config::RevealConfig;
use crate::dom::Dom;
use crate::event::{IntersectionEntry, Observation};

pub const CARD_CLASS: &str = "committee-card";
pub const ANIMATE_CLASS: &str = "animate";

/// Vertical extent of an element relative to the top of the viewport
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Fraction of `rect` inside a viewport of `viewport_height` whose bottom
/// edge is pulled up by `bottom_margin`
pub fn intersection_ratio(rect: Rect, viewport_height: f64, bottom_margin: f64) -> f64 {
    if rect.height <= 0.0 {
        return 0.0;
    }
    let bottom = (viewport_height - bottom_margin).max(0.0);
    let visible = (rect.top + rect.height).min(bottom) - rect.top.max(0.0);
    (visible.max(0.0) / rect.height).min(1.0)
}

/// Intersection report for `rect` under the given reveal settings
pub fn observe_rect<N>(
    node: N,
    rect: Rect,
    viewport_height: f64,
    config: &RevealConfig,
) -> IntersectionEntry<N> {
    let ratio = intersection_ratio(rect, viewport_height, config.bottom_margin);
    IntersectionEntry {
        node,
        is_intersecting: ratio > 0.0 && ratio >= config.threshold,
        ratio,
    }
}

#[derive(Debug)]
pub struct RevealAnimator<N> {
    observed: Vec<N>,
    threshold: f64,
    root_margin: String,
}

impl<N: Clone + PartialEq> RevealAnimator<N> {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            observed: Vec::new(),
            threshold: config.threshold,
            root_margin: config.root_margin(),
        }
    }

    pub fn attach<D: Dom<Node = N>>(&mut self, doc: &D) -> Option<Observation<N>> {
        self.observed = doc.elements_by_class(CARD_CLASS);
        if self.observed.is_empty() {
            return None;
        }
        Some(Observation {
            nodes: self.observed.clone(),
            threshold: self.threshold,
            root_margin: self.root_margin.clone(),
        })
    }

    pub fn detach(&mut self) {
        self.observed.clear();
    }

    pub fn observed(&self) -> &[N] {
        &self.observed
    }

    pub fn on_intersection<D: Dom<Node = N>>(
        &mut self,
        doc: &mut D,
        entries: &[IntersectionEntry<N>],
    ) {
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            if self.observed.contains(&entry.node) {
                doc.add_class(&entry.node, ANIMATE_CLASS);
            }
        }
    }
}
