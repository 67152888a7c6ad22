//! `Node`: owner of the reactions hosted at one simulation node.
//!
//! Reactions are keyed by a `ReactionId` allocated sequentially and never
//! reused, so ids held by the scheduler loop stay valid until the reaction
//! is removed.  Iteration follows id order (a `BTreeMap`), which keeps runs
//! that walk a node's reactions reproducible.

use std::collections::BTreeMap;

use tau_core::{NodeId, ReactionId, Time};
use tau_distribution::Transition;
use tracing::debug;

use crate::{Reaction, ReactionError, ReactionResult};

pub struct Node {
    id:        NodeId,
    next_id:   ReactionId,
    reactions: BTreeMap<ReactionId, Reaction>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self { id, next_id: ReactionId(0), reactions: BTreeMap::new() }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Host `reaction`, which must have been built for this node.
    pub fn add_reaction(&mut self, reaction: Reaction) -> ReactionId {
        debug_assert_eq!(reaction.node(), self.id, "reaction belongs to another node");
        let id = self.next_id;
        self.next_id = id.next();
        self.reactions.insert(id, reaction);
        id
    }

    pub fn remove_reaction(&mut self, id: ReactionId) -> ReactionResult<Reaction> {
        let reaction = self.reactions.remove(&id).ok_or(ReactionError::ReactionNotFound(id))?;
        debug!(node = %self.id, reaction = %id, "reaction removed");
        Ok(reaction)
    }

    pub fn get(&self, id: ReactionId) -> Option<&Reaction> {
        self.reactions.get(&id)
    }

    pub fn get_mut(&mut self, id: ReactionId) -> Option<&mut Reaction> {
        self.reactions.get_mut(&id)
    }

    pub fn contains(&self, id: ReactionId) -> bool {
        self.reactions.contains_key(&id)
    }

    /// Hosted reactions in id order.
    pub fn reactions(&self) -> impl Iterator<Item = (ReactionId, &Reaction)> {
        self.reactions.iter().map(|(id, r)| (*id, r))
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    /// Complete initialization of every hosted reaction.
    ///
    /// Reactions already exhausted at `now` are dropped; their ids are
    /// returned.
    pub fn initialize(&mut self, now: Time) -> ReactionResult<Vec<ReactionId>> {
        let mut exhausted = Vec::new();
        for (id, reaction) in self.reactions.iter_mut() {
            if reaction.initialization_complete(now)?.is_exhausted() {
                exhausted.push(*id);
            }
        }
        for id in &exhausted {
            self.remove_reaction(*id)?;
        }
        Ok(exhausted)
    }

    /// Update one reaction and apply its transition: `Exhausted` removes it.
    pub fn update_reaction(
        &mut self,
        id:       ReactionId,
        now:      Time,
        executed: bool,
    ) -> ReactionResult<Transition> {
        let reaction = self.reactions.get_mut(&id).ok_or(ReactionError::ReactionNotFound(id))?;
        let transition = reaction.update(now, executed)?;
        if transition.is_exhausted() {
            self.remove_reaction(id)?;
        }
        Ok(transition)
    }

    /// A node `id` hosting a clone of every reaction here, under the same
    /// reaction ids.  The clones still need [`initialize`][Self::initialize].
    pub fn clone_onto(&self, id: NodeId, now: Time) -> ReactionResult<Node> {
        let reactions = self
            .reactions
            .iter()
            .map(|(rid, r)| Ok((*rid, r.clone_on_new_node(id, now)?)))
            .collect::<ReactionResult<BTreeMap<_, _>>>()?;
        Ok(Node { id, next_id: self.next_id, reactions })
    }
}
