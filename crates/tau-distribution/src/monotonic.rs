//! Monotonic distributions: putative time only moves forward, and only when
//! the reaction actually executed.
//!
//! Conditions never rescale these laws.  On an executed update the gated
//! effective time is advanced by a freshly computed, non-negative delta; on
//! any other update the previous occurrence is kept as-is.  An occurrence of
//! `INFINITE` means the law is used up, reported as [`Transition::Exhausted`].

use std::fmt;

use tau_core::{SharedRng, Time};
use tracing::trace;

use crate::{DistributionError, DistributionResult, RealDistribution, StartGate, Transition};

/// Shared rule of every monotonic distribution, run inside a [`StartGate`].
fn monotonic_step<F>(
    distribution: &'static str,
    now:          Time,
    previous:     Time,
    executed:     bool,
    delta:        F,
) -> DistributionResult<Time>
where
    F: FnOnce() -> DistributionResult<Time>,
{
    if !executed {
        return Ok(previous);
    }
    let delta = delta()?;
    if delta < Time::ZERO {
        return Err(DistributionError::TimeRegression { distribution, now, next: now + delta });
    }
    Ok(now + delta)
}

fn monotonic_transition(next: Time) -> Transition {
    if next.is_infinite() { Transition::Exhausted } else { Transition::Scheduled(next) }
}

// ── DiracComb ─────────────────────────────────────────────────────────────────

const DIRAC: &str = "DiracComb";

/// Events at a fixed interval of `1 / rate`, the first one exactly at `start`.
#[derive(Clone, Debug)]
pub struct DiracComb {
    gate:     StartGate,
    interval: f64,
    /// Set by the first executed update; until then the step is zero so the
    /// first occurrence lands on the gated start itself.
    primed:   bool,
}

impl DiracComb {
    pub fn new(start: Time, rate: f64) -> DistributionResult<Self> {
        if !(rate > 0.0 && rate.is_finite()) {
            return Err(DistributionError::InvalidRate { distribution: DIRAC, rate });
        }
        Ok(Self { gate: StartGate::new(start), interval: 1.0 / rate, primed: false })
    }

    #[inline]
    pub fn next_occurrence(&self) -> Time {
        self.gate.next_occurrence()
    }

    /// Time of the first occurrence, unless initialized later than that.
    pub fn start_time(&self) -> Time {
        self.gate.start_time()
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn rate(&self) -> f64 {
        1.0 / self.interval
    }

    pub fn initialization_complete(&mut self, now: Time) -> DistributionResult<Transition> {
        self.update(now, true)
    }

    pub fn update(&mut self, now: Time, executed: bool) -> DistributionResult<Transition> {
        let step = if self.primed { Time::at(self.interval) } else { Time::ZERO };
        let next = self.gate.update(DIRAC, now, |now, previous| {
            monotonic_step(DIRAC, now, previous, executed, || Ok(step))
        })?;
        self.primed |= executed;
        trace!(next = %next, executed, "dirac comb: updated");
        Ok(monotonic_transition(next))
    }

    /// Same interval, no history: the copy starts at `max(now, start)`.
    pub fn clone_for(&self, now: Time) -> DistributionResult<Self> {
        let gate = StartGate::new(self.gate.clone_start(now));
        Ok(Self { gate, interval: self.interval, primed: false })
    }
}

impl fmt::Display for DiracComb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DIRAC}({})", self.interval)
    }
}

// ── AnyRealDistribution ───────────────────────────────────────────────────────

const ANY_REAL: &str = "AnyRealDistribution";

/// Waiting times drawn from an arbitrary continuous law.
///
/// Being generic, this does not support dynamic rate tuning: condition
/// propensities are never consulted.  To stay reproducible the law must be
/// sampled with the simulation's [`SharedRng`], which this type holds.
#[derive(Debug)]
pub struct AnyRealDistribution {
    gate: StartGate,
    law:  Box<dyn RealDistribution>,
    rng:  SharedRng,
}

impl AnyRealDistribution {
    /// First occurrence at `start` plus one sample of `law`.
    pub fn new(start: Time, law: Box<dyn RealDistribution>, rng: SharedRng) -> Self {
        Self { gate: StartGate::new(start), law, rng }
    }

    #[inline]
    pub fn next_occurrence(&self) -> Time {
        self.gate.next_occurrence()
    }

    pub fn start_time(&self) -> Time {
        self.gate.start_time()
    }

    /// Theoretical mean of the wrapped law.
    pub fn rate(&self) -> f64 {
        self.law.numerical_mean()
    }

    pub fn law(&self) -> &dyn RealDistribution {
        self.law.as_ref()
    }

    pub fn initialization_complete(&mut self, now: Time) -> DistributionResult<Transition> {
        self.update(now, true)
    }

    pub fn update(&mut self, now: Time, executed: bool) -> DistributionResult<Transition> {
        let law = self.law.as_ref();
        let rng = &self.rng;
        let next = self.gate.update(ANY_REAL, now, |now, previous| {
            monotonic_step(ANY_REAL, now, previous, executed, || {
                Ok(Time::try_new(law.sample(rng))?)
            })
        })?;
        trace!(next = %next, executed, "any-real: updated");
        Ok(monotonic_transition(next))
    }

    /// Requires the wrapped law to be duplicable.
    pub fn clone_for(&self, now: Time) -> DistributionResult<Self> {
        let law = self.law.try_clone().ok_or(DistributionError::UncloneableDistribution {
            type_name: self.law.type_name(),
        })?;
        Ok(Self::new(self.gate.clone_start(now), law, self.rng.clone()))
    }
}

impl fmt::Display for AnyRealDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ANY_REAL}({:?})", self.law)
    }
}
