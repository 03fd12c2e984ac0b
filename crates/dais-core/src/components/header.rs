//! Header Visibility Controller
//!
//! Hides the fixed header while the reader scrolls down past the threshold
//! and brings it back on any upward scroll.

use crate::config::HeaderConfig;
use crate::dom::Dom;
use crate::event::{Binding, EventKind, Handler, ListenTarget};

pub const HEADER_ID: &str = "header";
pub const HIDDEN_CLASS: &str = "hidden";

/// Whether the header should be hidden for a scroll from `previous` to `current`
pub fn should_hide(previous: f64, current: f64, threshold: f64) -> bool {
    current > previous && current > threshold
}

#[derive(Debug)]
pub struct HeaderController<N> {
    header: Option<N>,
    last_scroll_top: f64,
    threshold: f64,
}

impl<N: Clone> HeaderController<N> {
    pub fn new(config: &HeaderConfig) -> Self {
        Self {
            header: None,
            last_scroll_top: 0.0,
            threshold: config.hide_threshold,
        }
    }

    pub fn attach<D: Dom<Node = N>>(&mut self, doc: &D) -> Vec<Binding<N>> {
        self.header = doc.element_by_id(HEADER_ID);
        self.last_scroll_top = 0.0;
        match self.header {
            Some(_) => vec![Binding::passive(
                ListenTarget::Window,
                EventKind::Scroll,
                Handler::HeaderScroll,
            )],
            None => Vec::new(),
        }
    }

    pub fn detach(&mut self) {
        self.header = None;
        self.last_scroll_top = 0.0;
    }

    pub fn on_scroll<D: Dom<Node = N>>(&mut self, doc: &mut D) {
        let Some(header) = self.header.clone() else {
            return;
        };
        let scroll_top = doc.scroll_top();

        if should_hide(self.last_scroll_top, scroll_top, self.threshold) {
            doc.add_class(&header, HIDDEN_CLASS);
        } else {
            doc.remove_class(&header, HIDDEN_CLASS);
        }

        self.last_scroll_top = scroll_top;
    }

    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }
}
