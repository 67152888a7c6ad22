//! Deterministic simulation-wide random stream.
//!
//! # Determinism strategy
//!
//! One run draws every stochastic delay from a single `SmallRng` seeded from
//! [`SimConfig::seed`][crate::SimConfig].  Distributions do not own their
//! entropy: each holds a [`SharedRng`] handle onto that one stream, and a
//! distribution cloned onto another node keeps the same handle.  Only time
//! state is ever duplicated, never stream state, so a run replays exactly as
//! long as reactions are updated in the same order.
//!
//! `SharedRng` is `Rc<RefCell<..>>` underneath and therefore `!Send`: the
//! single scheduler loop that drives all updates is the only writer.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rand::distributions::Distribution;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Seeded simulation-level RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

impl RngCore for SimRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

// ── SharedRng ─────────────────────────────────────────────────────────────────

/// Cloneable handle onto the run's single random stream.
///
/// Cloning the handle does **not** fork the stream; both handles advance the
/// same generator.  Any `RngCore` can sit behind it, which lets tests inject
/// `rand::rngs::mock::StepRng` for fixed uniforms.
#[derive(Clone)]
pub struct SharedRng(Rc<RefCell<dyn RngCore>>);

impl SharedRng {
    pub fn new<R: RngCore + 'static>(rng: R) -> Self {
        SharedRng(Rc::new(RefCell::new(rng)))
    }

    /// Handle onto a fresh [`SimRng`] seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SimRng::new(seed))
    }

    /// Draw a uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn next_uniform(&self) -> f64 {
        self.0.borrow_mut().r#gen::<f64>()
    }

    /// Draw one sample from any `rand` distribution using this stream.
    pub fn sample<T, D: Distribution<T>>(&self, distribution: &D) -> T {
        let mut rng = self.0.borrow_mut();
        distribution.sample(&mut *rng)
    }

    /// `true` if both handles drive the same underlying stream.
    pub fn same_stream(&self, other: &SharedRng) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedRng(handles={})", Rc::strong_count(&self.0))
    }
}
