//! Event bindings between page behaviors and their host
//!
//! Attaching a behavior produces [`Binding`]s: which target to listen on, for
//! which event, and which [`Handler`] to run. The host registers the real
//! listeners and routes every delivery back through
//! [`Page::fire`](crate::page::Page::fire).

use crate::components::navigation::CardKind;

/// Event types the behaviors subscribe to
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum EventKind {
    Scroll,
    Click,
    PointerEnter,
    PointerLeave,
    KeyDown,
    /// Window load: every resource, not just the markup, has finished
    Load,
}

impl EventKind {
    /// DOM event type name
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Scroll => "scroll",
            EventKind::Click => "click",
            EventKind::PointerEnter => "mouseenter",
            EventKind::PointerLeave => "mouseleave",
            EventKind::KeyDown => "keydown",
            EventKind::Load => "load",
        }
    }
}

/// Where a listener is registered
#[derive(Clone, PartialEq, Debug)]
pub enum ListenTarget<N> {
    Window,
    Document,
    Element(N),
}

/// Which behavior routine runs for a delivered event
#[derive(Clone, PartialEq, Debug)]
pub enum Handler<N> {
    HeaderScroll,
    CardClick { node: N, kind: CardKind },
    HoverEnter(N),
    HoverLeave(N),
    PageLoad,
    HamburgerClick,
    NavLinkClick,
    OutsideClick,
    EscapeKey,
}

/// A single listener a behavior asks its host to register
#[derive(Clone, PartialEq, Debug)]
pub struct Binding<N> {
    pub target: ListenTarget<N>,
    pub kind: EventKind,
    /// Passive listeners promise never to prevent the default action
    pub passive: bool,
    pub handler: Handler<N>,
}

impl<N> Binding<N> {
    pub fn passive(target: ListenTarget<N>, kind: EventKind, handler: Handler<N>) -> Self {
        Self {
            target,
            kind,
            passive: true,
            handler,
        }
    }

    pub fn active(target: ListenTarget<N>, kind: EventKind, handler: Handler<N>) -> Self {
        Self {
            target,
            kind,
            passive: false,
            handler,
        }
    }
}

/// Request to watch elements entering the viewport
#[derive(Clone, PartialEq, Debug)]
pub struct Observation<N> {
    pub nodes: Vec<N>,
    pub threshold: f64,
    /// CSS root margin, e.g. `0px 0px -50px 0px`
    pub root_margin: String,
}

/// One report from an intersection watcher
#[derive(Clone, PartialEq, Debug)]
pub struct IntersectionEntry<N> {
    pub node: N,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// The parts of a delivered event the handlers look at
#[derive(Clone, PartialEq, Debug)]
pub struct EventData<N> {
    /// Element the event originated on
    pub target: Option<N>,
    /// Key name for keyboard events
    pub key: Option<String>,
}

impl<N> EventData<N> {
    pub fn empty() -> Self {
        Self {
            target: None,
            key: None,
        }
    }

    pub fn at(target: N) -> Self {
        Self {
            target: Some(target),
            key: None,
        }
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self {
            target: None,
            key: Some(key.into()),
        }
    }
}

/// What a handler asks the host to do with the native event
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Outcome {
    pub prevent_default: bool,
}

impl Outcome {
    pub fn prevented() -> Self {
        Self {
            prevent_default: true,
        }
    }

    pub fn merge(self, other: Outcome) -> Outcome {
        Outcome {
            prevent_default: self.prevent_default || other.prevent_default,
        }
    }
}

/// Everything a page asks its host to wire up
#[derive(Clone, PartialEq, Debug)]
pub struct Attachment<N> {
    pub bindings: Vec<Binding<N>>,
    pub observations: Vec<Observation<N>>,
}

impl<N> Default for Attachment<N> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
            observations: Vec::new(),
        }
    }
}
