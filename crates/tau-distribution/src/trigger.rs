//! Fixed-time distributions: `Trigger` (fires once) and `Immediately`.

use std::fmt;

use tau_core::Time;
use tracing::debug;

use crate::Transition;

// ── Trigger ───────────────────────────────────────────────────────────────────

/// A single occurrence at a fixed absolute time.
///
/// Once an update reports the reaction as executed the trigger is spent: the
/// next occurrence becomes `INFINITE` for good and every update from then on
/// returns [`Transition::Exhausted`], telling the host to drop the reaction.
#[derive(Clone, Debug)]
pub struct Trigger {
    will_occur_at: Time,
}

impl Trigger {
    pub fn new(at: Time) -> Self {
        Self { will_occur_at: at }
    }

    #[inline]
    pub fn next_occurrence(&self) -> Time {
        self.will_occur_at
    }

    /// Triggers carry no notion of frequency.
    pub fn rate(&self) -> f64 {
        0.0
    }

    pub fn is_spent(&self) -> bool {
        self.will_occur_at.is_infinite()
    }

    pub fn initialization_complete(&mut self) -> Transition {
        self.current()
    }

    pub fn update(&mut self, now: Time, executed: bool) -> Transition {
        if executed && !self.is_spent() {
            debug!(fired_at = %now, "trigger spent");
            self.will_occur_at = Time::INFINITE;
        }
        self.current()
    }

    fn current(&self) -> Transition {
        if self.is_spent() {
            Transition::Exhausted
        } else {
            Transition::Scheduled(self.will_occur_at)
        }
    }

    /// The copy fires at the same absolute time (or never, if this one is spent).
    pub fn clone_for(&self) -> Self {
        self.clone()
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Trigger({})", self.will_occur_at)
    }
}

// ── Immediately ───────────────────────────────────────────────────────────────

/// Always due: every update schedules the reaction at the current time.
#[derive(Clone, Debug, Default)]
pub struct Immediately {
    next: Time,
}

impl Immediately {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next_occurrence(&self) -> Time {
        self.next
    }

    pub fn rate(&self) -> f64 {
        f64::INFINITY
    }

    pub fn update(&mut self, now: Time) -> Transition {
        self.next = now;
        Transition::Scheduled(now)
    }

    pub fn clone_for(&self, now: Time) -> Self {
        Self { next: now }
    }
}

impl fmt::Display for Immediately {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Immediately")
    }
}
