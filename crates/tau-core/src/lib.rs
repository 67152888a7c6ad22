//! `tau-core` — foundational types for the `rust_tau` scheduling core.
//!
//! This crate is a dependency of every other `tau-*` crate.  It has no
//! `tau-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `ReactionId`                                    |
//! | [`time`]        | `Time` clock value, `SimConfig`                           |
//! | [`rng`]         | `SimRng` (seeded stream), `SharedRng` (cloneable handle)  |
//! | [`condition`]   | `Condition` contract, `Contribution`, `evaluate`          |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Time`, `SimConfig`.|

pub mod condition;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use condition::{Condition, Contribution, evaluate};
pub use error::{CoreError, CoreResult};
pub use ids::{NodeId, ReactionId};
pub use rng::{SharedRng, SimRng};
pub use time::{SimConfig, Time};
