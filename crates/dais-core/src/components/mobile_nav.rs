//! Mobile Navigation Toggle
//!
//! Off-canvas menu driven by the hamburger button. The button and the panel
//! both carry `active` while the menu is open and the body scroll is locked
//! for the same span.
//!
//! The open state is read back from the panel on every event, so the two
//! flags are always written together and can never drift apart.

use crate::dom::Dom;
use crate::event::{Binding, EventData, EventKind, Handler, ListenTarget};

pub const BUTTON_ID: &str = "hamburger-btn";
pub const PANEL_ID: &str = "mobile-nav";
pub const LINK_CLASS: &str = "mobile-nav-link";
pub const ACTIVE_CLASS: &str = "active";
pub const ESCAPE_KEY: &str = "Escape";

#[derive(Debug)]
pub struct MobileNav<N> {
    button: Option<N>,
    panel: Option<N>,
}

impl<N: Clone> MobileNav<N> {
    pub fn new() -> Self {
        Self {
            button: None,
            panel: None,
        }
    }

    pub fn attach<D: Dom<Node = N>>(&mut self, doc: &D) -> Vec<Binding<N>> {
        let (Some(button), Some(panel)) =
            (doc.element_by_id(BUTTON_ID), doc.element_by_id(PANEL_ID))
        else {
            self.detach();
            return Vec::new();
        };

        let mut bindings = vec![Binding::passive(
            ListenTarget::Element(button.clone()),
            EventKind::Click,
            Handler::HamburgerClick,
        )];
        bindings.extend(doc.elements_by_class(LINK_CLASS).into_iter().map(|link| {
            Binding::passive(ListenTarget::Element(link), EventKind::Click, Handler::NavLinkClick)
        }));
        bindings.extend([
            Binding::passive(ListenTarget::Document, EventKind::Click, Handler::OutsideClick),
            Binding::passive(ListenTarget::Document, EventKind::KeyDown, Handler::EscapeKey),
        ]);

        self.button = Some(button);
        self.panel = Some(panel);
        bindings
    }

    pub fn detach(&mut self) {
        self.button = None;
        self.panel = None;
    }

    fn elements(&self) -> Option<(N, N)> {
        Some((self.button.clone()?, self.panel.clone()?))
    }

    /// Whether the menu is currently open
    pub fn is_open<D: Dom<Node = N>>(&self, doc: &D) -> bool {
        self.panel
            .as_ref()
            .is_some_and(|panel| doc.has_class(panel, ACTIVE_CLASS))
    }

    fn set_open<D: Dom<Node = N>>(&self, doc: &mut D, open: bool) {
        let Some((button, panel)) = self.elements() else {
            return;
        };
        if open {
            doc.add_class(&button, ACTIVE_CLASS);
            doc.add_class(&panel, ACTIVE_CLASS);
        } else {
            doc.remove_class(&button, ACTIVE_CLASS);
            doc.remove_class(&panel, ACTIVE_CLASS);
        }
        if let Some(body) = doc.body() {
            doc.set_style(&body, "overflow", if open { "hidden" } else { "" });
        }
    }

    pub fn on_toggle<D: Dom<Node = N>>(&self, doc: &mut D) {
        if self.elements().is_none() {
            return;
        }
        let was_open = self.is_open(doc);
        tracing::info!(active = was_open, "Hamburger clicked");

        self.set_open(doc, !was_open);

        tracing::info!(active = !was_open, "Hamburger toggled");
    }

    pub fn on_link_click<D: Dom<Node = N>>(&self, doc: &mut D) {
        self.set_open(doc, false);
    }

    pub fn on_document_click<D: Dom<Node = N>>(&self, doc: &mut D, event: &EventData<N>) {
        let Some((button, panel)) = self.elements() else {
            return;
        };
        let inside = event
            .target
            .as_ref()
            .is_some_and(|target| doc.contains(&button, target) || doc.contains(&panel, target));
        if !inside {
            self.set_open(doc, false);
        }
    }

    pub fn on_key_down<D: Dom<Node = N>>(&self, doc: &mut D, event: &EventData<N>) {
        if event.key.as_deref() == Some(ESCAPE_KEY) && self.is_open(doc) {
            self.set_open(doc, false);
        }
    }
}

impl<N: Clone> Default for MobileNav<N> {
    fn default() -> Self {
        Self::new()
    }
}
