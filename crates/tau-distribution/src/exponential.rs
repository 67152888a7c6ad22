//! `ExponentialTime`: Markovian events with random-variate reuse.
//!
//! # Rescheduling rule
//!
//! With `p` the propensity obtained from the folded condition
//! [`Contribution`] and `p₀` the one cached from the previous update:
//!
//! ```text
//! p = 0                         → INFINITE
//! p = +inf                      → now
//! executed, or p₀ ∉ (0, +inf)   → now + Exp(p)                 (fresh draw)
//! otherwise                     → now + (next - now) · p₀ / p   (reuse)
//! ```
//!
//! The reuse branch is exact, not an approximation: the residual waiting time
//! of an exponential race that has not fired yet is itself exponential, and
//! rescaling it by `p₀ / p` gives precisely the law a fresh draw at rate `p`
//! would have.  No entropy is consumed when only the propensity moved.

use std::fmt;

use tau_core::{Contribution, SharedRng, Time};
use tracing::trace;

use crate::{DistributionError, DistributionResult, StartGate, Transition};

const NAME: &str = "ExponentialTime";

#[derive(Clone, Debug)]
pub struct ExponentialTime {
    gate: StartGate,
    /// Markovian constant, before any condition scaling.
    rate: f64,
    /// Propensity computed by the last update; NaN until the first one.
    last_propensity: f64,
    rng: SharedRng,
}

impl ExponentialTime {
    /// Markovian distribution with base `rate`, gated at `start`.
    ///
    /// A rate of zero is legal (the reaction simply never fires); negative or
    /// NaN rates are rejected.
    pub fn new(rate: f64, start: Time, rng: SharedRng) -> DistributionResult<Self> {
        if rate < 0.0 || rate.is_nan() {
            return Err(DistributionError::InvalidRate { distribution: NAME, rate });
        }
        Ok(Self { gate: StartGate::new(start), rate, last_propensity: f64::NAN, rng })
    }

    #[inline]
    pub fn next_occurrence(&self) -> Time {
        self.gate.next_occurrence()
    }

    pub fn start_time(&self) -> Time {
        self.gate.start_time()
    }

    pub fn markovian_rate(&self) -> f64 {
        self.rate
    }

    /// Last computed propensity, or the base rate before the first update.
    pub fn rate(&self) -> f64 {
        if self.last_propensity.is_nan() { self.rate } else { self.last_propensity }
    }

    /// The handle this distribution draws from.
    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }

    /// First sample: a forced fresh draw at the current contribution.
    pub fn initialization_complete(
        &mut self,
        now:          Time,
        contribution: Contribution,
    ) -> DistributionResult<Transition> {
        self.update(now, true, contribution)
    }

    /// `contribution` is the caller's fold of the reaction's conditions.
    pub fn update(
        &mut self,
        now:          Time,
        executed:     bool,
        contribution: Contribution,
    ) -> DistributionResult<Transition> {
        let rate = self.rate;
        let rng  = &self.rng;
        let last = &mut self.last_propensity;

        let next = self.gate.update(NAME, now, |now, previous| {
            let old = *last;
            let propensity = contribution.propensity(rate);
            *last = propensity;

            if propensity == 0.0 {
                return Ok(Time::INFINITE);
            }
            if propensity == f64::INFINITY {
                return Ok(now);
            }
            // A zero, infinite or missing previous propensity carries no
            // usable variate.
            let reusable = old > 0.0 && old.is_finite();
            if executed || !reusable {
                let delta = uniform_to_exponential(rng.next_uniform(), propensity);
                trace!(propensity, delta, "exponential: fresh draw");
                return Ok(now + Time::at(delta));
            }
            trace!(old, propensity, "exponential: rescaling previous variate");
            Ok(now + (previous - now) * (old / propensity))
        })?;

        Ok(Transition::from_next(next))
    }

    /// Copy with the same rate and the same random stream, starting at
    /// `max(now, start)` with no cached propensity.
    pub fn clone_for(&self, now: Time) -> Self {
        Self {
            gate:            StartGate::new(self.gate.clone_start(now)),
            rate:            self.rate,
            last_propensity: f64::NAN,
            rng:             self.rng.clone(),
        }
    }
}

impl fmt::Display for ExponentialTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NAME}({})", self.rate)
    }
}

/// Inverse-CDF transform: `-ln(1 - u) / lambda` for `u ∈ [0, 1)`.
#[inline]
pub(crate) fn uniform_to_exponential(u: f64, lambda: f64) -> f64 {
    -(-u).ln_1p() / lambda
}
