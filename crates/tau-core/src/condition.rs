//! The `Condition` contract: the only thing this core asks of model
//! conditions.
//!
//! A condition scales the propensity of the reaction it belongs to.  The
//! scheduling core folds the contributions of a reaction's conditions, in
//! order, with [`evaluate`]:
//!
//! | Contribution      | Effect                                         |
//! |-------------------|------------------------------------------------|
//! | `0`               | reaction blocked; later conditions not read    |
//! | `+inf`            | reaction fires now, unless a later one blocks  |
//! | finite, positive  | multiplies the propensity                      |
//! | negative or NaN   | [`CoreError::InvalidPropensity`]               |
//!
//! A `0` anywhere in the list therefore wins over any `+inf`.

use std::rc::Rc;

use crate::{CoreError, CoreResult, NodeId};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// A model-supplied weight on a reaction's propensity.
///
/// Conditions are owned by the model and shared with reactions as
/// `Rc<dyn Condition>`; the core only reads them.
pub trait Condition {
    /// Non-negative scaling factor for the hosting reaction's propensity.
    fn propensity_contribution(&self) -> f64;

    /// Human-readable identity used in error messages.
    fn name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// The equivalent condition for a copy of the reaction hosted on `node`.
    fn clone_on_new_node(&self, node: NodeId) -> Rc<dyn Condition>;
}

// ── Evaluation ────────────────────────────────────────────────────────────────

/// The folded contribution of a condition list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Contribution {
    /// Some condition contributed exactly `0`.
    Blocked,
    /// Some condition contributed `+inf`.
    Immediate,
    /// Product of all contributions (`1.0` for an empty list).
    Scaled(f64),
}

impl Contribution {
    /// Propensity of a reaction whose base rate is `base`.
    ///
    /// `Blocked` and `Immediate` win over `base`, so a zero base rate with an
    /// infinite contribution is still `+inf`.
    #[inline]
    pub fn propensity(self, base: f64) -> f64 {
        match self {
            Contribution::Blocked   => 0.0,
            Contribution::Immediate => f64::INFINITY,
            Contribution::Scaled(p) => base * p,
        }
    }

    #[inline]
    pub fn is_blocked(self) -> bool {
        matches!(self, Contribution::Blocked)
    }
}

impl Default for Contribution {
    /// The fold of an empty condition list.
    fn default() -> Self {
        Contribution::Scaled(1.0)
    }
}

/// Fold `conditions` in order.
///
/// A `0` stops the fold at once.  A `+inf` is remembered but the remaining
/// conditions are still read, so a later `0` blocks and a later invalid
/// value fails.
pub fn evaluate(conditions: &[Rc<dyn Condition>]) -> CoreResult<Contribution> {
    let mut product = 1.0;
    let mut immediate = false;
    for condition in conditions {
        let value = condition.propensity_contribution();
        if value < 0.0 || value.is_nan() {
            return Err(CoreError::InvalidPropensity {
                condition: condition.name(),
                value,
            });
        }
        if value == 0.0 {
            return Ok(Contribution::Blocked);
        }
        if value == f64::INFINITY {
            immediate = true;
        } else {
            product *= value;
        }
    }
    Ok(if immediate { Contribution::Immediate } else { Contribution::Scaled(product) })
}
