//! Timer queue for deferred page work
//!
//! Provides `setTimeout`/`setInterval` semantics against explicit
//! timestamps. The scheduler never reads a clock itself: hosts pass the
//! current instant in and pull due tasks out.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Handle returned when scheduling; used to cancel
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A scheduled task
#[derive(Debug)]
struct ScheduledTask<T> {
    /// When the task should run, in epoch milliseconds
    run_at: i64,
    id: TimerId,
    task: T,
    /// If Some, this is a repeating task with the given interval
    repeat_interval: Option<i64>,
}

impl<T> PartialEq for ScheduledTask<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ScheduledTask<T> {}

impl<T> PartialOrd for ScheduledTask<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ScheduledTask<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (earliest first, then FIFO)
        other
            .run_at
            .cmp(&self.run_at)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Deterministic queue of one-shot and repeating timers
#[derive(Debug)]
pub struct Scheduler<T> {
    tasks: BinaryHeap<ScheduledTask<T>>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: BinaryHeap::new(),
            next_id: 0,
        }
    }

    /// `now + delay_ms`, pinned to `i64::MAX` instead of wrapping
    fn due_at(now: i64, delay_ms: u64) -> i64 {
        now.saturating_add(i64::try_from(delay_ms).unwrap_or(i64::MAX))
    }

    fn allocate_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Run `task` once, `delay_ms` after `now`
    pub fn schedule_after(&mut self, now: i64, delay_ms: u64, task: T) -> TimerId {
        let id = self.allocate_id();
        self.tasks.push(ScheduledTask {
            run_at: Self::due_at(now, delay_ms),
            id,
            task,
            repeat_interval: None,
        });
        id
    }

    /// Run `task` every `interval_ms`, first at `now + interval_ms`
    pub fn schedule_every(&mut self, now: i64, interval_ms: u64, task: T) -> TimerId {
        let id = self.allocate_id();
        let interval = i64::try_from(interval_ms.max(1)).unwrap_or(i64::MAX);
        self.tasks.push(ScheduledTask {
            run_at: now.saturating_add(interval),
            id,
            task,
            repeat_interval: Some(interval),
        });
        id
    }

    /// Drop a pending timer; returns whether it was still pending
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Instant of the earliest pending task
    pub fn next_due(&self) -> Option<i64> {
        self.tasks.peek().map(|task| task.run_at)
    }

    /// Milliseconds from `now` until the earliest pending task
    pub fn time_until_next(&self, now: i64) -> Option<u64> {
        self.next_due()
            .map(|due| u64::try_from(due.saturating_sub(now)).unwrap_or(0))
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

}

impl<T: Clone> Scheduler<T> {
    /// Take the earliest task due at or before `now`
    ///
    /// Repeating tasks are re-queued one interval after their previous due
    /// instant, so they keep their phase even when pumped late.
    pub fn pop_due(&mut self, now: i64) -> Option<(TimerId, T)> {
        if self.tasks.peek()?.run_at > now {
            return None;
        }
        let task = self.tasks.pop()?;
        let fired = (task.id, task.task.clone());
        if let Some(interval) = task.repeat_interval {
            self.tasks.push(ScheduledTask {
                run_at: task.run_at.saturating_add(interval),
                ..task
            });
        }
        Some(fired)
    }
}
