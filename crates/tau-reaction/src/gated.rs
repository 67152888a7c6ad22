//! `PropensityGated`: a reaction whose rate and tau follow its conditions.
//!
//! # Gating
//!
//! Executability is decided by propensity alone: the reaction is executable
//! unless some condition contributes exactly `0`.
//!
//! ```text
//! contributions   rate                    tau            distribution
//! ─────────────   ─────────────────────   ────────────   ─────────────────
//! any 0           0                       INFINITE       not touched
//! +inf, no 0      +inf                    now            updated
//! otherwise       base_rate · Π values    its next       updated
//! ```
//!
//! A `0` anywhere blocks the reaction, even after a `+inf`.  Conditions are
//! read once per update; the folded [`Contribution`] is handed to the
//! distribution rather than the conditions themselves.
//!
//! When the reaction becomes executable again without having fired, the
//! distribution is updated as if it had executed, so a stale (possibly
//! infinite) occurrence is replaced by a fresh one.  One-shot distributions
//! are exempt: re-arming a `Trigger` would consume it.

use std::fmt;
use std::rc::Rc;

use tau_core::{Condition, Contribution, NodeId, Time, evaluate};
use tau_distribution::{DistributionError, TimeDistribution, Transition};
use tracing::{debug, trace};

use crate::{ReactionError, ReactionResult};

pub struct PropensityGated {
    distribution: TimeDistribution,
    conditions:   Vec<Rc<dyn Condition>>,
    node:         NodeId,
    /// Only `ExponentialTime` may drive a Markovian reaction.
    markovian:    bool,
    rate:         f64,
    tau:          Time,
    executable:   bool,
    initialized:  bool,
}

impl PropensityGated {
    pub fn new(
        node:         NodeId,
        distribution: TimeDistribution,
        conditions:   Vec<Rc<dyn Condition>>,
    ) -> Self {
        Self {
            rate: distribution.base_rate(),
            distribution,
            conditions,
            node,
            markovian: false,
            tau: Time::INFINITE,
            executable: false,
            initialized: false,
        }
    }

    /// A reaction restricted to Markovian (exponential) timing.
    pub fn markovian(
        node:         NodeId,
        distribution: TimeDistribution,
        conditions:   Vec<Rc<dyn Condition>>,
    ) -> ReactionResult<Self> {
        check_markovian(&distribution)?;
        Ok(Self { markovian: true, ..Self::new(node, distribution, conditions) })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn conditions(&self) -> &[Rc<dyn Condition>] {
        &self.conditions
    }

    pub fn distribution(&self) -> &TimeDistribution {
        &self.distribution
    }

    pub fn is_markovian(&self) -> bool {
        self.markovian
    }

    /// `false` while some condition blocks the reaction.
    pub fn is_executable(&self) -> bool {
        self.executable
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Last computed propensity.  Before initialization, the base rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn tau(&self) -> ReactionResult<Time> {
        if !self.initialized {
            return Err(ReactionError::UninitializedAccess { node: self.node });
        }
        Ok(self.tau)
    }

    pub fn initialization_complete(&mut self, now: Time) -> ReactionResult<Transition> {
        let transition = self.refresh(now, true, true)?;
        self.initialized = true;
        Ok(transition)
    }

    pub fn update(&mut self, now: Time, executed: bool) -> ReactionResult<Transition> {
        if !self.initialized {
            return Err(ReactionError::UninitializedAccess { node: self.node });
        }
        self.refresh(now, executed, false)
    }

    fn refresh(&mut self, now: Time, executed: bool, initial: bool) -> ReactionResult<Transition> {
        let contribution = evaluate(&self.conditions)?;
        let was_executable = self.executable;
        self.executable = !contribution.is_blocked();

        if !self.executable {
            if was_executable || initial {
                debug!(node = %self.node, distribution = %self.distribution, %now, "reaction blocked");
            }
            self.rate = 0.0;
            self.tau = Time::INFINITE;
            return Ok(Transition::Disabled);
        }

        let transition = if initial {
            self.distribution.initialization_complete(now, contribution)?
        } else {
            let forced = executed || (!was_executable && !self.distribution.is_one_shot());
            if forced && !executed {
                trace!(node = %self.node, %now, "reaction re-enabled: forcing distribution refresh");
            }
            self.distribution.update(now, forced, contribution)?
        };

        self.rate = contribution.propensity(self.distribution.base_rate());
        let transition = match (contribution, transition) {
            (Contribution::Immediate, t) if !t.is_exhausted() => Transition::Scheduled(now),
            (_, t) => t,
        };
        self.tau = transition.time();
        if self.tau < now {
            return Err(DistributionError::TimeRegression {
                distribution: self.distribution.kind(),
                now,
                next: self.tau,
            }
            .into());
        }
        Ok(transition)
    }

    /// Copy onto `node` at `now`: conditions and distribution are cloned for
    /// the new host, nothing else carries over.  Needs initialization.
    pub fn clone_on_new_node(&self, node: NodeId, now: Time) -> ReactionResult<Self> {
        let distribution = self.distribution.clone_for(node, now)?;
        self.clone_with_distribution(node, distribution)
    }

    /// Copy onto `node` driven by `distribution` instead of a clone of ours.
    pub fn clone_with_distribution(
        &self,
        node:         NodeId,
        distribution: TimeDistribution,
    ) -> ReactionResult<Self> {
        if self.markovian {
            check_markovian(&distribution)?;
        }
        let conditions = self.conditions.iter().map(|c| c.clone_on_new_node(node)).collect();
        Ok(Self { markovian: self.markovian, ..Self::new(node, distribution, conditions) })
    }

    pub fn kind(&self) -> &'static str {
        if self.markovian { "MarkovianReaction" } else { "PropensityGated" }
    }
}

fn check_markovian(distribution: &TimeDistribution) -> ReactionResult<()> {
    if distribution.is_markovian() {
        Ok(())
    } else {
        Err(ReactionError::IncompatibleCloneTarget {
            reaction:     "MarkovianReaction",
            distribution: distribution.kind(),
        })
    }
}

impl fmt::Debug for PropensityGated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.kind())
            .field("node", &self.node)
            .field("distribution", &self.distribution)
            .field("conditions", &self.conditions.len())
            .field("rate", &self.rate)
            .field("tau", &self.tau)
            .finish()
    }
}
