//! Headless simulation
//!
//! Drives a [`Page`] over a [`HeadlessDocument`] the way a browser would:
//! listeners are matched against the attachment's bindings, clicks bubble
//! from the target up to the document, intersections are computed from
//! element rectangles after every scroll, and time only moves through
//! [`Simulation::advance`].

use crate::clock::{Clock, ManualClock};
use crate::components::reveal::observe_rect;
use crate::config::SiteConfig;
use crate::error::DaisResult;
use crate::event::{Attachment, EventData, EventKind, ListenTarget, Outcome};
use crate::headless::{HeadlessDocument, NodeId};
use crate::page::Page;

pub struct Simulation {
    page: Page<HeadlessDocument, ManualClock>,
    clock: ManualClock,
    attachment: Attachment<NodeId>,
}

impl Simulation {
    /// Attach a page at `start_millis` and report the initial intersections
    pub fn new(doc: HeadlessDocument, config: SiteConfig, start_millis: i64) -> DaisResult<Self> {
        let clock = ManualClock::new(start_millis);
        let mut page = Page::new(doc, clock.clone(), config)?;
        let attachment = page.attach();
        let mut sim = Self {
            page,
            clock,
            attachment,
        };
        sim.observe_viewport();
        Ok(sim)
    }

    pub fn page(&self) -> &Page<HeadlessDocument, ManualClock> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page<HeadlessDocument, ManualClock> {
        &mut self.page
    }

    pub fn doc(&self) -> &HeadlessDocument {
        self.page.doc()
    }

    pub fn attachment(&self) -> &Attachment<NodeId> {
        &self.attachment
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Deliver `kind` to every listener on `path`, in path order
    fn dispatch(
        &mut self,
        kind: EventKind,
        path: &[ListenTarget<NodeId>],
        event: EventData<NodeId>,
    ) -> Outcome {
        let handlers: Vec<_> = path
            .iter()
            .flat_map(|target| {
                self.attachment
                    .bindings
                    .iter()
                    .filter(move |binding| binding.kind == kind && binding.target == *target)
                    .map(|binding| binding.handler.clone())
            })
            .collect();

        handlers
            .iter()
            .fold(Outcome::default(), |outcome, handler| {
                outcome.merge(self.page.fire(handler, &event))
            })
    }

    /// Propagation path for a bubbling event originating at `node`
    fn bubble_path(&self, node: NodeId) -> Vec<ListenTarget<NodeId>> {
        self.doc()
            .ancestors(node)
            .into_iter()
            .map(ListenTarget::Element)
            .chain([ListenTarget::Document, ListenTarget::Window])
            .collect()
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.page.doc_mut().set_scroll_top(offset);
        self.dispatch(EventKind::Scroll, &[ListenTarget::Window], EventData::empty());
        self.observe_viewport();
    }

    pub fn click(&mut self, node: NodeId) -> Outcome {
        let path = self.bubble_path(node);
        self.dispatch(EventKind::Click, &path, EventData::at(node))
    }

    pub fn pointer_enter(&mut self, node: NodeId) {
        self.dispatch(EventKind::PointerEnter, &[ListenTarget::Element(node)], EventData::at(node));
    }

    pub fn pointer_leave(&mut self, node: NodeId) {
        self.dispatch(EventKind::PointerLeave, &[ListenTarget::Element(node)], EventData::at(node));
    }

    /// Key press with focus on the body
    pub fn key_down(&mut self, key: &str) -> Outcome {
        let body = self.doc().root();
        let path = self.bubble_path(body);
        self.dispatch(EventKind::KeyDown, &path, EventData::key(key))
    }

    pub fn load(&mut self) {
        self.dispatch(EventKind::Load, &[ListenTarget::Window], EventData::empty());
    }

    /// Move time forward, firing each timer with the clock at its due instant
    ///
    /// Returns the number of timer tasks run.
    pub fn advance(&mut self, millis: i64) -> usize {
        let end = self.clock.now_millis().saturating_add(millis.max(0));
        let mut ran = 0;
        while let Some(due) = self.page.next_due().filter(|due| *due <= end) {
            if due > self.clock.now_millis() {
                self.clock.set(due);
            }
            ran += self.page.run_due();
        }
        self.clock.set(end);
        ran
    }

    /// Compute intersection reports for every observed element with a rect
    pub fn observe_viewport(&mut self) {
        let reveal = self.page.config().reveal.clone();
        let doc = self.page.doc();
        let entries: Vec<_> = self
            .attachment
            .observations
            .iter()
            .flat_map(|observation| observation.nodes.iter().copied())
            .filter_map(|node| {
                let rect = doc.viewport_rect(node)?;
                Some(observe_rect(node, rect, doc.viewport_height(), &reveal))
            })
            .collect();
        if !entries.is_empty() {
            self.page.intersect(&entries);
        }
    }

    /// Re-attach the page, as after a fresh parse of the same document
    pub fn reattach(&mut self) {
        self.attachment = self.page.attach();
        self.observe_viewport();
    }

    pub fn detach(&mut self) {
        self.page.detach();
        self.attachment = Attachment::default();
    }
}
