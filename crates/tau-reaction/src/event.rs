//! `Event`: a reaction scheduled purely by its time distribution.

use std::fmt;
use std::rc::Rc;

use tau_core::{Condition, Contribution, NodeId, Time};
use tau_distribution::{TimeDistribution, Transition};
use tracing::debug;

use crate::{ReactionError, ReactionResult};

/// Condition propensities play no part in when an `Event` fires; its
/// conditions are kept only so clones carry them to the new node.
pub struct Event {
    distribution: TimeDistribution,
    conditions:   Vec<Rc<dyn Condition>>,
    node:         NodeId,
    initialized:  bool,
}

impl Event {
    pub fn new(
        node:         NodeId,
        distribution: TimeDistribution,
        conditions:   Vec<Rc<dyn Condition>>,
    ) -> Self {
        Self { distribution, conditions, node, initialized: false }
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

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn rate(&self) -> f64 {
        self.distribution.rate()
    }

    pub fn tau(&self) -> ReactionResult<Time> {
        if !self.initialized {
            return Err(ReactionError::UninitializedAccess { node: self.node });
        }
        Ok(self.distribution.next_occurrence())
    }

    pub fn initialization_complete(&mut self, now: Time) -> ReactionResult<Transition> {
        let transition = self.distribution.initialization_complete(now, Contribution::default())?;
        self.initialized = true;
        Ok(transition)
    }

    /// An executed update that leaves no future occurrence is `Exhausted`.
    pub fn update(&mut self, now: Time, executed: bool) -> ReactionResult<Transition> {
        if !self.initialized {
            return Err(ReactionError::UninitializedAccess { node: self.node });
        }
        let transition = self.distribution.update(now, executed, Contribution::default())?;
        if executed && transition.time().is_infinite() {
            debug!(node = %self.node, distribution = %self.distribution, %now, "event exhausted");
            return Ok(Transition::Exhausted);
        }
        Ok(transition)
    }

    pub fn clone_on_new_node(&self, node: NodeId, now: Time) -> ReactionResult<Self> {
        let distribution = self.distribution.clone_for(node, now)?;
        let conditions = self.conditions.iter().map(|c| c.clone_on_new_node(node)).collect();
        Ok(Self::new(node, distribution, conditions))
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("node", &self.node)
            .field("distribution", &self.distribution)
            .field("conditions", &self.conditions.len())
            .field("initialized", &self.initialized)
            .finish()
    }
}
