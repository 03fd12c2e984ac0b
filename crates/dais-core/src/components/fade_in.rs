//! Page Fade-in
//!
//! On window load the body is blanked and then faded back in after a short
//! delay, hiding late layout shifts.

use crate::config::FadeInConfig;
use crate::dom::Dom;
use crate::event::{Binding, EventKind, Handler, ListenTarget};
use crate::scheduler::{Scheduler, TimerId};

use super::TimerTask;

#[derive(Debug)]
pub struct FadeIn {
    config: FadeInConfig,
    pending: Option<TimerId>,
}

impl FadeIn {
    pub fn new(config: &FadeInConfig) -> Self {
        Self {
            config: config.clone(),
            pending: None,
        }
    }

    pub fn attach<D: Dom>(&mut self, doc: &D) -> Vec<Binding<D::Node>> {
        match doc.body() {
            Some(_) => vec![Binding::passive(
                ListenTarget::Window,
                EventKind::Load,
                Handler::PageLoad,
            )],
            None => Vec::new(),
        }
    }

    pub fn detach<N>(&mut self, sched: &mut Scheduler<TimerTask<N>>) {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
    }

    pub fn on_load<D: Dom>(
        &mut self,
        doc: &mut D,
        sched: &mut Scheduler<TimerTask<D::Node>>,
        now: i64,
    ) {
        let Some(body) = doc.body() else {
            return;
        };
        doc.set_style(&body, "opacity", "0");
        doc.set_style(&body, "transition", &self.config.transition);

        // A repeated load restarts the fade rather than stacking reveals
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
        self.pending = Some(sched.schedule_after(now, self.config.delay_ms, TimerTask::FadeIn));
    }

    pub fn on_reveal<D: Dom>(&mut self, doc: &mut D) {
        self.pending = None;
        if let Some(body) = doc.body() {
            doc.set_style(&body, "opacity", "1");
        }
    }
}
