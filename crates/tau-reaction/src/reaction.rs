//! The closed set of reaction variants.

use std::fmt;
use std::rc::Rc;

use tau_core::{Condition, NodeId, Time};
use tau_distribution::{TimeDistribution, Transition};

use crate::{Event, PropensityGated, ReactionResult};

/// What the scheduler loop and [`Node`][crate::Node] see of a reaction.
#[derive(Debug)]
pub enum Reaction {
    Gated(PropensityGated),
    Event(Event),
}

impl Reaction {
    /// Putative execution time.  `UninitializedAccess` before
    /// [`initialization_complete`][Self::initialization_complete].
    pub fn tau(&self) -> ReactionResult<Time> {
        match self {
            Reaction::Gated(r) => r.tau(),
            Reaction::Event(r) => r.tau(),
        }
    }

    pub fn rate(&self) -> f64 {
        match self {
            Reaction::Gated(r) => r.rate(),
            Reaction::Event(r) => r.rate(),
        }
    }

    pub fn initialization_complete(&mut self, now: Time) -> ReactionResult<Transition> {
        match self {
            Reaction::Gated(r) => r.initialization_complete(now),
            Reaction::Event(r) => r.initialization_complete(now),
        }
    }

    pub fn update(&mut self, now: Time, executed: bool) -> ReactionResult<Transition> {
        match self {
            Reaction::Gated(r) => r.update(now, executed),
            Reaction::Event(r) => r.update(now, executed),
        }
    }

    /// Same variant on `node`, with cloned conditions and distribution.
    pub fn clone_on_new_node(&self, node: NodeId, now: Time) -> ReactionResult<Reaction> {
        Ok(match self {
            Reaction::Gated(r) => r.clone_on_new_node(node, now)?.into(),
            Reaction::Event(r) => r.clone_on_new_node(node, now)?.into(),
        })
    }

    pub fn node(&self) -> NodeId {
        match self {
            Reaction::Gated(r) => r.node(),
            Reaction::Event(r) => r.node(),
        }
    }

    pub fn conditions(&self) -> &[Rc<dyn Condition>] {
        match self {
            Reaction::Gated(r) => r.conditions(),
            Reaction::Event(r) => r.conditions(),
        }
    }

    pub fn distribution(&self) -> &TimeDistribution {
        match self {
            Reaction::Gated(r) => r.distribution(),
            Reaction::Event(r) => r.distribution(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Reaction::Gated(r) => r.kind(),
            Reaction::Event(_) => "Event",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]@{}", self.kind(), self.distribution(), self.node())
    }
}

impl From<PropensityGated> for Reaction {
    fn from(r: PropensityGated) -> Self {
        Reaction::Gated(r)
    }
}

impl From<Event> for Reaction {
    fn from(r: Event) -> Self {
        Reaction::Event(r)
    }
}
