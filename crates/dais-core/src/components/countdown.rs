//! Countdown Timer
//!
//! Renders the days/hours/minutes/seconds left until the event into four
//! display slots. After one immediate render the first tick is aligned to
//! the next wall-clock second, then it ticks every second. Reaching the
//! target renders all zeros, swaps the subtitle to the completion message
//! and stops for good.

use std::fmt;

use crate::config::CountdownConfig;
use crate::dom::Dom;
use crate::error::DaisResult;
use crate::scheduler::{Scheduler, TimerId};

use super::TimerTask;

pub const SUBTITLE_CLASS: &str = "countdown-subtitle";
pub const TICK_MS: u64 = 1_000;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = SECOND_MS * 60;
const HOUR_MS: i64 = MINUTE_MS * 60;
const DAY_MS: i64 = HOUR_MS * 24;

/// Element ids for the four display slots, largest unit first
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SlotIds {
    pub days: &'static str,
    pub hours: &'static str,
    pub minutes: &'static str,
    pub seconds: &'static str,
}

pub const PREFERRED_SLOT_IDS: SlotIds = SlotIds {
    days: "cd-d",
    hours: "cd-h",
    minutes: "cd-m",
    seconds: "cd-s",
};

pub const LEGACY_SLOT_IDS: SlotIds = SlotIds {
    days: "cd-days",
    hours: "cd-hours",
    minutes: "cd-minutes",
    seconds: "cd-seconds",
};

/// Time left, decomposed largest unit first
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Decompose a duration; negative durations clamp to zero
    pub fn from_millis(millis: i64) -> Self {
        let mut diff = millis.max(0);
        let days = diff / DAY_MS;
        diff -= days * DAY_MS;
        let hours = diff / HOUR_MS;
        diff -= hours * HOUR_MS;
        let minutes = diff / MINUTE_MS;
        diff -= minutes * MINUTE_MS;
        let seconds = diff / SECOND_MS;
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn between(target_millis: i64, now_millis: i64) -> Self {
        Self::from_millis(target_millis - now_millis)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Slot texts: days, hours, minutes, seconds
    pub fn slot_texts(&self) -> [String; 4] {
        [
            pad2(self.days),
            pad2(self.hours),
            pad2(self.minutes),
            pad2(self.seconds),
        ]
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d, h, m, s] = self.slot_texts();
        write!(f, "{d}d {h}h {m}m {s}s")
    }
}

/// Zero-pad to at least two digits
pub fn pad2(value: i64) -> String {
    format!("{value:02}")
}

/// Delay until the next whole wall-clock second
pub fn align_delay(now_millis: i64) -> u64 {
    (SECOND_MS - now_millis.rem_euclid(SECOND_MS)) as u64
}

/// Resolved display slots
#[derive(Clone, PartialEq, Debug)]
pub struct CountdownSlots<N> {
    pub days: N,
    pub hours: N,
    pub minutes: N,
    pub seconds: N,
}

impl<N> CountdownSlots<N> {
    /// Look up each slot by its preferred id, falling back to the legacy id
    ///
    /// Returns `None` unless all four slots resolve.
    pub fn resolve<D: Dom<Node = N>>(doc: &D) -> Option<Self> {
        let find = |preferred: &str, legacy: &str| {
            doc.element_by_id(preferred)
                .or_else(|| doc.element_by_id(legacy))
        };
        Some(Self {
            days: find(PREFERRED_SLOT_IDS.days, LEGACY_SLOT_IDS.days)?,
            hours: find(PREFERRED_SLOT_IDS.hours, LEGACY_SLOT_IDS.hours)?,
            minutes: find(PREFERRED_SLOT_IDS.minutes, LEGACY_SLOT_IDS.minutes)?,
            seconds: find(PREFERRED_SLOT_IDS.seconds, LEGACY_SLOT_IDS.seconds)?,
        })
    }

    fn render<D: Dom<Node = N>>(&self, doc: &mut D, remaining: &Remaining) {
        let [d, h, m, s] = remaining.slot_texts();
        doc.set_text(&self.days, &d);
        doc.set_text(&self.hours, &h);
        doc.set_text(&self.minutes, &m);
        doc.set_text(&self.seconds, &s);
    }
}

/// Lifecycle of the countdown on a page
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CountdownPhase {
    /// Not attached, or the page lacks display slots
    Inactive,
    /// Waiting for the aligned first tick
    Aligning,
    Ticking,
    /// Target reached; no further renders
    Finished,
}

#[derive(Debug)]
pub struct Countdown<N> {
    target_millis: i64,
    completion_message: String,
    slots: Option<CountdownSlots<N>>,
    start: Option<TimerId>,
    interval: Option<TimerId>,
    phase: CountdownPhase,
}

impl<N: Clone> Countdown<N> {
    pub fn new(config: &CountdownConfig) -> DaisResult<Self> {
        Ok(Self {
            target_millis: config.target_instant()?.timestamp_millis(),
            completion_message: config.completion_message.clone(),
            slots: None,
            start: None,
            interval: None,
            phase: CountdownPhase::Inactive,
        })
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    /// Resolve slots, render once and arm the aligned first tick
    pub fn attach<D: Dom<Node = N>>(
        &mut self,
        doc: &mut D,
        sched: &mut Scheduler<TimerTask<N>>,
        now: i64,
    ) {
        self.detach(sched);
        self.slots = CountdownSlots::resolve(doc);
        if self.slots.is_none() {
            tracing::debug!("Countdown slots not found, countdown disabled");
            return;
        }

        self.phase = CountdownPhase::Aligning;
        self.tick(doc, sched, now);
        if self.phase == CountdownPhase::Aligning {
            let start = sched.schedule_after(now, align_delay(now), TimerTask::CountdownStart);
            self.start = Some(start);
        }
    }

    pub fn detach(&mut self, sched: &mut Scheduler<TimerTask<N>>) {
        for id in [self.start.take(), self.interval.take()].into_iter().flatten() {
            sched.cancel(id);
        }
        self.slots = None;
        self.phase = CountdownPhase::Inactive;
    }

    /// The aligned first tick; starts the one-second interval
    pub fn on_start<D: Dom<Node = N>>(
        &mut self,
        doc: &mut D,
        sched: &mut Scheduler<TimerTask<N>>,
        now: i64,
    ) {
        self.start = None;
        if self.phase != CountdownPhase::Aligning {
            return;
        }
        self.phase = CountdownPhase::Ticking;
        self.tick(doc, sched, now);
        if self.phase == CountdownPhase::Ticking {
            self.interval = Some(sched.schedule_every(now, TICK_MS, TimerTask::CountdownTick));
        }
    }

    pub fn on_tick<D: Dom<Node = N>>(
        &mut self,
        doc: &mut D,
        sched: &mut Scheduler<TimerTask<N>>,
        now: i64,
    ) {
        if self.phase == CountdownPhase::Ticking {
            self.tick(doc, sched, now);
        }
    }

    fn tick<D: Dom<Node = N>>(
        &mut self,
        doc: &mut D,
        sched: &mut Scheduler<TimerTask<N>>,
        now: i64,
    ) {
        let Some(slots) = &self.slots else {
            return;
        };
        slots.render(doc, &Remaining::between(self.target_millis, now));

        if self.target_millis - now <= 0 {
            if let Some(subtitle) = doc.first_by_class(SUBTITLE_CLASS) {
                doc.set_text(&subtitle, &self.completion_message);
            }
            for id in [self.start.take(), self.interval.take()].into_iter().flatten() {
                sched.cancel(id);
            }
            self.phase = CountdownPhase::Finished;
            tracing::info!("Countdown reached its target");
        }
    }
}
