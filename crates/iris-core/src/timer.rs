//! Virtual clock and the viewer's pending timers.
//!
//! The host owns real time and reports it through `Viewer::advance`; the
//! queue fires whatever falls due in deadline order.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Show the viewed image even though its natural size is unknown.
    LoadFallback,
    /// End of the wheel zoom debounce.
    WheelDebounce,
    /// Hide the zoom tooltip.
    TooltipHide,
    /// Advance the slideshow.
    Slideshow,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    deadline: Duration,
    seq: u64,
    kind: TimerKind,
}

/// At most one timer per kind; scheduling a kind again replaces it.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    seq: u64,
    pending: Vec<Pending>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `kind` after `delay` from now.
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.cancel(kind);
        self.seq += 1;
        self.pending.push(Pending {
            deadline: self.now + delay,
            seq: self.seq,
            kind,
        });
    }

    /// Returns whether a timer of that kind was pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.kind != kind);
        self.pending.len() != before
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|p| p.kind == kind)
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<Duration> {
        self.pending.iter().find(|p| p.kind == kind).map(|p| p.deadline)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove the earliest timer due at or before `until` and move the clock
    /// to its deadline. Timers with equal deadlines fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerKind> {
        let (pos, next) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= until)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(i, p)| (i, *p))?;
        self.pending.remove(pos);
        self.now = self.now.max(next.deadline);
        Some(next.kind)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
