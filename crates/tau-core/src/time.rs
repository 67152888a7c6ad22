//! Simulation time model.
//!
//! # Design
//!
//! Reactions fire at arbitrary real-valued instants, so time is an `f64`
//! wrapped in [`Time`].  NaN is never a valid time: [`Time::try_new`] rejects
//! it and the arithmetic operators assert its absence in debug builds.  With
//! NaN excluded, `f64::total_cmp` gives `Time` a total order in which
//! [`Time::INFINITE`] sits above every finite value.
//!
//! `INFINITE` doubles as the "never" sentinel: a disabled or exhausted
//! reaction reports it as its putative execution time.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::{CoreError, CoreResult, SharedRng};

// ── Time ──────────────────────────────────────────────────────────────────────

/// An absolute (or relative) simulation time.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time(f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    /// Later than every finite time.  Used for "never".
    pub const INFINITE: Time = Time(f64::INFINITY);

    /// Wrap a raw value.
    ///
    /// # Panics
    /// Panics in debug mode if `value` is NaN.  Use [`Time::try_new`] for
    /// values coming from configuration.
    #[inline]
    pub fn at(value: f64) -> Time {
        debug_assert!(!value.is_nan(), "simulation time cannot be NaN");
        Time(value)
    }

    /// Checked constructor: NaN is an [`CoreError::InvalidTime`].
    pub fn try_new(value: f64) -> CoreResult<Time> {
        if value.is_nan() {
            return Err(CoreError::InvalidTime(value));
        }
        Ok(Time(value))
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// `true` for [`Time::INFINITE`] (and for negative infinity, which no
    /// well-formed model produces).
    #[inline]
    pub fn is_infinite(self) -> bool {
        self.0.is_infinite()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Time) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Time) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Time) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Time {
    type Output = Time;
    #[inline]
    fn add(self, rhs: Time) -> Time {
        Time::at(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;
    #[inline]
    fn sub(self, rhs: Time) -> Time {
        Time::at(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;
    #[inline]
    fn mul(self, rhs: f64) -> Time {
        Time::at(self.0 * rhs)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == f64::INFINITY {
            write!(f, "t=inf")
        } else {
            write!(f, "t={}", self.0)
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level settings the scheduling core needs from the host simulator.
///
/// Typically loaded from a TOML/JSON file by the application crate (enable
/// the `serde` feature) and used to seed the shared random stream.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical schedules.
    pub seed: u64,

    /// Time at which the simulation starts; distributions built without an
    /// explicit start use this.
    pub start_time: Time,
}

impl SimConfig {
    pub fn new(seed: u64, start_time: Time) -> Self {
        Self { seed, start_time }
    }

    /// Reject start times no schedule can be built on.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.start_time.is_finite() {
            return Err(CoreError::Config(format!(
                "start_time must be finite, got {}",
                self.start_time
            )));
        }
        Ok(())
    }

    /// Construct the shared random stream for this run.
    pub fn make_rng(&self) -> SharedRng {
        SharedRng::seeded(self.seed)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 0, start_time: Time::ZERO }
    }
}
