//! `tau-distribution` — the laws that decide *when* a reaction fires next.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | [`gate`]         | `StartGate` — start-time gating around any resampling rule   |
//! | [`exponential`]  | `ExponentialTime` — Markovian rate with variate reuse        |
//! | [`monotonic`]    | `DiracComb`, `AnyRealDistribution`                           |
//! | [`law`]          | `RealDistribution` trait, `RealLaw` catalogue                |
//! | [`trigger`]      | `Trigger` (one-shot), `Immediately`                          |
//! | [`distribution`] | `TimeDistribution` enum, `Transition` intent                 |
//! | [`config`]       | `DistributionConfig` — declarative construction              |
//! | [`error`]        | `DistributionError`, `DistributionResult<T>`                 |
//!
//! # Update protocol
//!
//! The owning reaction calls [`TimeDistribution::initialization_complete`]
//! once, then [`TimeDistribution::update`] after every scheduler step that may
//! have affected it.  Each call returns a [`Transition`]:
//!
//! ```text
//! Scheduled(t)  → next occurrence is t
//! Disabled      → next occurrence is INFINITE, may come back later
//! Exhausted     → will never fire again; the host should drop the reaction
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod exponential;
pub mod gate;
pub mod law;
pub mod monotonic;
pub mod trigger;


pub use config::DistributionConfig;
pub use distribution::{TimeDistribution, Transition};
pub use error::{DistributionError, DistributionResult};
pub use exponential::ExponentialTime;
pub use gate::StartGate;
pub use law::{RealDistribution, RealLaw};
pub use monotonic::{AnyRealDistribution, DiracComb};
pub use trigger::{Immediately, Trigger};
