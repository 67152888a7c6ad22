//! `StartGate`: keeps a distribution from firing before its start time.
//!
//! # Gating rule
//!
//! ```text
//! schedulable  ← schedulable || now ≥ start        (one-way)
//! effective    = schedulable ? now : start
//! next         = strategy(effective, previous_next)
//! next < now   → TimeRegression (fatal, never clamped)
//! ```
//!
//! Feeding `start` as the effective time until the simulation reaches it
//! means no strategy can land an occurrence before `start`, however its own
//! arithmetic behaves.  Each concrete distribution embeds a gate and hands
//! its resampling rule to [`StartGate::update`] as a closure.

use tau_core::Time;

use crate::{DistributionError, DistributionResult};

/// Start-time gate plus the cached next occurrence it protects.
#[derive(Clone, Debug)]
pub struct StartGate {
    start:       Time,
    schedulable: bool,
    next:        Time,
}

impl StartGate {
    /// A gate opening at `start`.  The next occurrence initially reads `start`.
    pub fn new(start: Time) -> Self {
        Self { start, schedulable: false, next: start }
    }

    pub fn start_time(&self) -> Time {
        self.start
    }

    /// Cached result of the last successful [`update`][Self::update].
    #[inline]
    pub fn next_occurrence(&self) -> Time {
        self.next
    }

    /// `true` once simulation time has reached the start time.
    pub fn is_schedulable(&self) -> bool {
        self.schedulable
    }

    /// Run `strategy(effective_now, previous_next)` under the gate and cache
    /// its result.
    ///
    /// `distribution` names the caller in the error raised when the strategy
    /// lands strictly before `now`; the cached time is left untouched then.
    pub fn update<F>(
        &mut self,
        distribution: &'static str,
        now:          Time,
        strategy:     F,
    ) -> DistributionResult<Time>
    where
        F: FnOnce(Time, Time) -> DistributionResult<Time>,
    {
        if !self.schedulable && now >= self.start {
            self.schedulable = true;
        }
        let effective = if self.schedulable { now } else { self.start };
        let next = strategy(effective, self.next)?;
        if next < now {
            return Err(DistributionError::TimeRegression { distribution, now, next });
        }
        self.next = next;
        Ok(next)
    }

    /// Start time for a copy made at `now`: never earlier than the original's.
    #[inline]
    pub fn clone_start(&self, now: Time) -> Time {
        now.max(self.start)
    }
}
