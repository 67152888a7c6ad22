//! `tau-reaction` — reactions and the node that hosts them.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`gated`]    | `PropensityGated` — rate and tau derived from conditions     |
//! | [`event`]    | `Event` — purely time-driven, conditions ignored             |
//! | [`reaction`] | `Reaction` enum dispatching over both variants               |
//! | [`node`]     | `Node` — owns reactions, applies `Transition`s               |
//! | [`error`]    | `ReactionError`, `ReactionResult<T>`                         |
//!
//! # Lifecycle
//!
//! ```text
//! Constructed ──initialization_complete──▶ Initialized
//!                                              │
//!                          ┌── Scheduled ◀─────┴────▶ Disabled ──┐
//!                          └──────────────▶ Exhausted ◀──────────┘
//!                                              │
//!                                  Node drops the reaction (Removed)
//! ```
//!
//! A reaction never removes itself.  `update` returns a
//! [`Transition`][tau_distribution::Transition] and [`Node::update_reaction`]
//! drops the reaction when that transition is `Exhausted`.

pub mod error;
pub mod event;
pub mod gated;
pub mod node;
pub mod reaction;

#[cfg(test)]
mod tests;

pub use error::{ReactionError, ReactionResult};
pub use event::Event;
pub use gated::PropensityGated;
pub use node::Node;
pub use reaction::Reaction;
