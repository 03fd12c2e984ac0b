//! The page session
//!
//! [`Page`] owns the document, the clock, the timer queue and one instance
//! of every behavior. Hosts call [`Page::attach`] once the markup is
//! parsed, register the returned bindings, and feed deliveries back through
//! [`Page::fire`], [`Page::intersect`] and [`Page::run_due`].

use crate::clock::Clock;
use crate::components::overlay::reset_overlay;
use crate::components::{
    CardNavigator, Countdown, CountdownPhase, FadeIn, HeaderController, HoverAccent, MobileNav,
    RevealAnimator, TimerTask,
};
use crate::config::SiteConfig;
use crate::dom::Dom;
use crate::error::DaisResult;
use crate::event::{Attachment, EventData, Handler, IntersectionEntry, Outcome};
use crate::scheduler::Scheduler;

pub struct Page<D: Dom, C: Clock> {
    doc: D,
    clock: C,
    config: SiteConfig,
    scheduler: Scheduler<TimerTask<D::Node>>,
    header: HeaderController<D::Node>,
    reveal: RevealAnimator<D::Node>,
    navigator: CardNavigator<D::Node>,
    hover: HoverAccent<D::Node>,
    fade_in: FadeIn,
    mobile_nav: MobileNav<D::Node>,
    countdown: Countdown<D::Node>,
    attached: bool,
}

impl<D: Dom, C: Clock> Page<D, C> {
    pub fn new(doc: D, clock: C, config: SiteConfig) -> DaisResult<Self> {
        config.validate()?;
        Ok(Self {
            header: HeaderController::new(&config.header),
            reveal: RevealAnimator::new(&config.reveal),
            navigator: CardNavigator::new(&config.press, &config.routes),
            hover: HoverAccent::new(&config.hover),
            fade_in: FadeIn::new(&config.fade_in),
            mobile_nav: MobileNav::new(),
            countdown: Countdown::new(&config.countdown)?,
            scheduler: Scheduler::new(),
            doc,
            clock,
            config,
            attached: false,
        })
    }

    /// Attach every behavior to the document
    ///
    /// Re-attaching first detaches, so bindings from a previous attach must
    /// be dropped by the host.
    pub fn attach(&mut self) -> Attachment<D::Node> {
        if self.attached {
            self.detach();
        }
        let now = self.clock.now_millis();
        let mut attachment = Attachment::default();

        attachment.bindings.extend(self.header.attach(&self.doc));
        attachment.observations.extend(self.reveal.attach(&self.doc));
        attachment.bindings.extend(self.navigator.attach(&mut self.doc));
        reset_overlay(&mut self.doc);
        attachment.bindings.extend(self.hover.attach(&self.doc));
        attachment.bindings.extend(self.fade_in.attach(&self.doc));
        attachment.bindings.extend(self.mobile_nav.attach(&self.doc));
        self.countdown.attach(&mut self.doc, &mut self.scheduler, now);

        self.attached = true;
        tracing::info!(
            bindings = attachment.bindings.len(),
            observations = attachment.observations.len(),
            countdown = ?self.countdown.phase(),
            "Page attached"
        );
        attachment
    }

    /// Tear down every behavior and cancel pending timers
    pub fn detach(&mut self) {
        self.header.detach();
        self.reveal.detach();
        self.navigator.detach();
        self.hover.detach();
        self.fade_in.detach(&mut self.scheduler);
        self.mobile_nav.detach();
        self.countdown.detach(&mut self.scheduler);
        self.scheduler.cancel_all();
        self.attached = false;
        tracing::debug!("Page detached");
    }

    /// Run the behavior routine behind a binding
    pub fn fire(&mut self, handler: &Handler<D::Node>, event: &EventData<D::Node>) -> Outcome {
        if !self.attached {
            return Outcome::default();
        }
        let now = self.clock.now_millis();
        match handler {
            Handler::HeaderScroll => self.header.on_scroll(&mut self.doc),
            Handler::CardClick { node, kind } => {
                return self
                    .navigator
                    .on_click(&mut self.doc, &mut self.scheduler, now, node, *kind, event);
            }
            Handler::HoverEnter(node) => self.hover.on_enter(&mut self.doc, node),
            Handler::HoverLeave(node) => self.hover.on_leave(&mut self.doc, node),
            Handler::PageLoad => self.fade_in.on_load(&mut self.doc, &mut self.scheduler, now),
            Handler::HamburgerClick => self.mobile_nav.on_toggle(&mut self.doc),
            Handler::NavLinkClick => self.mobile_nav.on_link_click(&mut self.doc),
            Handler::OutsideClick => self.mobile_nav.on_document_click(&mut self.doc, event),
            Handler::EscapeKey => self.mobile_nav.on_key_down(&mut self.doc, event),
        }
        Outcome::default()
    }

    /// Deliver intersection reports for observed elements
    pub fn intersect(&mut self, entries: &[IntersectionEntry<D::Node>]) {
        if self.attached {
            self.reveal.on_intersection(&mut self.doc, entries);
        }
    }

    /// Run every timer due at the clock's current instant
    ///
    /// Returns the number of tasks run.
    pub fn run_due(&mut self) -> usize {
        let now = self.clock.now_millis();
        let mut ran = 0;
        while let Some((_, task)) = self.scheduler.pop_due(now) {
            self.run_task(task, now);
            ran += 1;
        }
        ran
    }

    fn run_task(&mut self, task: TimerTask<D::Node>, now: i64) {
        match task {
            TimerTask::PressRelease { node, kind } => {
                self.navigator.on_release(&mut self.doc, &node, kind)
            }
            TimerTask::FadeIn => self.fade_in.on_reveal(&mut self.doc),
            TimerTask::CountdownStart => {
                self.countdown.on_start(&mut self.doc, &mut self.scheduler, now)
            }
            TimerTask::CountdownTick => {
                self.countdown.on_tick(&mut self.doc, &mut self.scheduler, now)
            }
        }
    }

    /// Instant of the next pending timer, in epoch milliseconds
    pub fn next_due(&self) -> Option<i64> {
        self.scheduler.next_due()
    }

    /// Milliseconds until the next pending timer
    pub fn time_until_next(&self) -> Option<u64> {
        self.scheduler.time_until_next(self.clock.now_millis())
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn countdown_phase(&self) -> CountdownPhase {
        self.countdown.phase()
    }

    pub fn last_scroll_top(&self) -> f64 {
        self.header.last_scroll_top()
    }

    pub fn observed(&self) -> &[D::Node] {
        self.reveal.observed()
    }

    pub fn is_menu_open(&self) -> bool {
        self.mobile_nav.is_open(&self.doc)
    }

    pub fn doc(&self) -> &D {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}
