//! The closed set of time distributions and the `Transition` intent they
//! return from every update.

use std::fmt;

use tau_core::{Contribution, NodeId, Time};
use tracing::trace;

use crate::{
    AnyRealDistribution, DiracComb, DistributionResult, ExponentialTime, Immediately, Trigger,
};

// ── Transition ────────────────────────────────────────────────────────────────

/// What an update means for the hosting reaction.
///
/// Distributions never reach back into their host.  A spent distribution
/// says so by returning `Exhausted`, and whoever owns the reaction (normally
/// a `Node`) removes it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Next occurrence at this (finite) time.
    Scheduled(Time),
    /// Next occurrence is `INFINITE` for now; a later update may revive it.
    Disabled,
    /// Will never occur again.
    Exhausted,
}

impl Transition {
    /// `Scheduled(next)`, or `Disabled` when `next` is `INFINITE`.
    #[inline]
    pub fn from_next(next: Time) -> Transition {
        if next.is_infinite() { Transition::Disabled } else { Transition::Scheduled(next) }
    }

    /// The putative time this transition implies.
    pub fn time(self) -> Time {
        match self {
            Transition::Scheduled(t) => t,
            Transition::Disabled | Transition::Exhausted => Time::INFINITE,
        }
    }

    pub fn is_exhausted(self) -> bool {
        matches!(self, Transition::Exhausted)
    }
}

// ── TimeDistribution ──────────────────────────────────────────────────────────

/// The law governing one reaction's next occurrence.
///
/// Owned exclusively by its reaction.  The reaction folds its conditions
/// once per update and passes the resulting [`Contribution`] in; only
/// [`ExponentialTime`] reads it.
#[derive(Debug)]
pub enum TimeDistribution {
    Exponential(ExponentialTime),
    DiracComb(DiracComb),
    AnyReal(AnyRealDistribution),
    Trigger(Trigger),
    Immediately(Immediately),
}

impl TimeDistribution {
    /// Cached next occurrence from the last update.
    pub fn next_occurrence(&self) -> Time {
        match self {
            TimeDistribution::Exponential(d) => d.next_occurrence(),
            TimeDistribution::DiracComb(d)   => d.next_occurrence(),
            TimeDistribution::AnyReal(d)     => d.next_occurrence(),
            TimeDistribution::Trigger(d)     => d.next_occurrence(),
            TimeDistribution::Immediately(d) => d.next_occurrence(),
        }
    }

    /// Average occurrences per time unit, as currently known.
    pub fn rate(&self) -> f64 {
        match self {
            TimeDistribution::Exponential(d) => d.rate(),
            TimeDistribution::DiracComb(d)   => d.rate(),
            TimeDistribution::AnyReal(d)     => d.rate(),
            TimeDistribution::Trigger(d)     => d.rate(),
            TimeDistribution::Immediately(d) => d.rate(),
        }
    }

    /// Configured rate before any condition scaling.
    pub fn base_rate(&self) -> f64 {
        match self {
            TimeDistribution::Exponential(d) => d.markovian_rate(),
            other => other.rate(),
        }
    }

    /// Called once, after the whole environment is built.
    pub fn initialization_complete(
        &mut self,
        now:          Time,
        contribution: Contribution,
    ) -> DistributionResult<Transition> {
        match self {
            TimeDistribution::Exponential(d) => d.initialization_complete(now, contribution),
            TimeDistribution::DiracComb(d)   => d.initialization_complete(now),
            TimeDistribution::AnyReal(d)     => d.initialization_complete(now),
            TimeDistribution::Trigger(d)     => Ok(d.initialization_complete()),
            TimeDistribution::Immediately(d) => Ok(d.update(now)),
        }
    }

    /// Recompute the next occurrence.
    ///
    /// `executed` is `true` when the hosting reaction has just fired.
    pub fn update(
        &mut self,
        now:          Time,
        executed:     bool,
        contribution: Contribution,
    ) -> DistributionResult<Transition> {
        match self {
            TimeDistribution::Exponential(d) => d.update(now, executed, contribution),
            TimeDistribution::DiracComb(d)   => d.update(now, executed),
            TimeDistribution::AnyReal(d)     => d.update(now, executed),
            TimeDistribution::Trigger(d)     => Ok(d.update(now, executed)),
            TimeDistribution::Immediately(d) => Ok(d.update(now)),
        }
    }

    /// Independent copy for a reaction cloned onto `node` at `now`.
    pub fn clone_for(&self, node: NodeId, now: Time) -> DistributionResult<TimeDistribution> {
        trace!(%node, %now, distribution = %self, "cloning time distribution");
        Ok(match self {
            TimeDistribution::Exponential(d) => d.clone_for(now).into(),
            TimeDistribution::DiracComb(d)   => d.clone_for(now)?.into(),
            TimeDistribution::AnyReal(d)     => d.clone_for(now)?.into(),
            TimeDistribution::Trigger(d)     => d.clone_for().into(),
            TimeDistribution::Immediately(d) => d.clone_for(now).into(),
        })
    }

    /// `true` for laws that fire at most once and must not be force-refreshed.
    pub fn is_one_shot(&self) -> bool {
        matches!(self, TimeDistribution::Trigger(_))
    }

    pub fn is_markovian(&self) -> bool {
        matches!(self, TimeDistribution::Exponential(_))
    }

    /// Variant name, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TimeDistribution::Exponential(_) => "ExponentialTime",
            TimeDistribution::DiracComb(_)   => "DiracComb",
            TimeDistribution::AnyReal(_)     => "AnyRealDistribution",
            TimeDistribution::Trigger(_)     => "Trigger",
            TimeDistribution::Immediately(_) => "Immediately",
        }
    }
}

impl fmt::Display for TimeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeDistribution::Exponential(d) => fmt::Display::fmt(d, f),
            TimeDistribution::DiracComb(d)   => fmt::Display::fmt(d, f),
            TimeDistribution::AnyReal(d)     => fmt::Display::fmt(d, f),
            TimeDistribution::Trigger(d)     => fmt::Display::fmt(d, f),
            TimeDistribution::Immediately(d) => fmt::Display::fmt(d, f),
        }
    }
}

macro_rules! from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for TimeDistribution {
                fn from(d: $ty) -> Self {
                    TimeDistribution::$variant(d)
                }
            }
        )*
    };
}

from_variant! {
    Exponential(ExponentialTime),
    DiracComb(DiracComb),
    AnyReal(AnyRealDistribution),
    Trigger(Trigger),
    Immediately(Immediately),
}
