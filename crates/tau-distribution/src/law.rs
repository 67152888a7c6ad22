//! Continuous probability laws for [`AnyRealDistribution`][crate::AnyRealDistribution].
//!
//! Any type implementing [`RealDistribution`] can drive an
//! `AnyRealDistribution`.  [`RealLaw`] is the built-in catalogue, backed by
//! `rand_distr` and selectable by name so models can pick a law from
//! configuration:
//!
//! | Name          | Parameters               | Mean                     |
//! |---------------|--------------------------|--------------------------|
//! | `uniform`     | `low, high`              | `(low + high) / 2`       |
//! | `normal`      | `mean, std_dev`          | `mean`                   |
//! | `lognormal`   | `mu, sigma`              | `exp(mu + sigma² / 2)`   |
//! | `exponential` | `lambda`                 | `1 / lambda`             |
//! | `gamma`       | `shape, scale`           | `shape · scale`          |
//! | `triangular`  | `min, max, mode`         | `(min + max + mode) / 3` |

use std::fmt;

use rand_distr::{Exp, Gamma, LogNormal, Normal, Triangular, Uniform};
use tau_core::SharedRng;

use crate::{DistributionError, DistributionResult};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// A univariate continuous law sampled with the simulation's random stream.
pub trait RealDistribution: fmt::Debug {
    /// One fresh sample.
    fn sample(&self, rng: &SharedRng) -> f64;

    /// Theoretical mean; reported as the rate of the wrapping distribution.
    fn numerical_mean(&self) -> f64;

    /// An independent copy, or `None` if this law cannot be duplicated.
    fn try_clone(&self) -> Option<Box<dyn RealDistribution>> {
        None
    }

    /// Named in the error raised when cloning fails.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

// ── RealLaw ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Sampler {
    Uniform(Uniform<f64>),
    Normal(Normal<f64>),
    LogNormal(LogNormal<f64>),
    Exponential(Exp<f64>),
    Gamma(Gamma<f64>),
    Triangular(Triangular<f64>),
}

/// A named law from the built-in catalogue.
#[derive(Clone, Debug)]
pub struct RealLaw {
    name:    &'static str,
    params:  Vec<f64>,
    mean:    f64,
    sampler: Sampler,
}

impl RealLaw {
    /// Build a law from its case-insensitive `name` and positional parameters.
    pub fn from_name(name: &str, params: &[f64]) -> DistributionResult<RealLaw> {
        match name.to_ascii_lowercase().as_str() {
            "uniform" => {
                let [low, high] = expect_params::<2>("uniform", params)?;
                if low >= high || !low.is_finite() || !high.is_finite() {
                    return Err(invalid("uniform", format!("need finite low < high, got [{low}, {high})")));
                }
                Ok(Self::build("uniform", params, (low + high) / 2.0, Sampler::Uniform(Uniform::new(low, high))))
            }
            "normal" => {
                let [mean, std_dev] = expect_params::<2>("normal", params)?;
                let d = Normal::new(mean, std_dev).map_err(|e| invalid("normal", e))?;
                Ok(Self::build("normal", params, mean, Sampler::Normal(d)))
            }
            "lognormal" => {
                let [mu, sigma] = expect_params::<2>("lognormal", params)?;
                let d = LogNormal::new(mu, sigma).map_err(|e| invalid("lognormal", e))?;
                Ok(Self::build("lognormal", params, (mu + sigma * sigma / 2.0).exp(), Sampler::LogNormal(d)))
            }
            "exponential" => {
                let [lambda] = expect_params::<1>("exponential", params)?;
                let d = Exp::new(lambda).map_err(|e| invalid("exponential", e))?;
                Ok(Self::build("exponential", params, 1.0 / lambda, Sampler::Exponential(d)))
            }
            "gamma" => {
                let [shape, scale] = expect_params::<2>("gamma", params)?;
                let d = Gamma::new(shape, scale).map_err(|e| invalid("gamma", e))?;
                Ok(Self::build("gamma", params, shape * scale, Sampler::Gamma(d)))
            }
            "triangular" => {
                let [min, max, mode] = expect_params::<3>("triangular", params)?;
                let d = Triangular::new(min, max, mode).map_err(|e| invalid("triangular", e))?;
                Ok(Self::build("triangular", params, (min + max + mode) / 3.0, Sampler::Triangular(d)))
            }
            _ => Err(DistributionError::UnknownLaw(name.to_string())),
        }
    }

    fn build(name: &'static str, params: &[f64], mean: f64, sampler: Sampler) -> RealLaw {
        RealLaw { name, params: params.to_vec(), mean, sampler }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl RealDistribution for RealLaw {
    fn sample(&self, rng: &SharedRng) -> f64 {
        match &self.sampler {
            Sampler::Uniform(d)     => rng.sample(d),
            Sampler::Normal(d)      => rng.sample(d),
            Sampler::LogNormal(d)   => rng.sample(d),
            Sampler::Exponential(d) => rng.sample(d),
            Sampler::Gamma(d)       => rng.sample(d),
            Sampler::Triangular(d)  => rng.sample(d),
        }
    }

    fn numerical_mean(&self) -> f64 {
        self.mean
    }

    fn try_clone(&self) -> Option<Box<dyn RealDistribution>> {
        Some(Box::new(self.clone()))
    }
}

impl fmt::Display for RealLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.name, self.params)
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn expect_params<const N: usize>(law: &str, params: &[f64]) -> DistributionResult<[f64; N]> {
    <[f64; N]>::try_from(params)
        .map_err(|_| invalid(law, format!("expected {N} parameters, got {}", params.len())))
}

fn invalid(law: &str, reason: impl ToString) -> DistributionError {
    DistributionError::InvalidLawParameters { law: law.to_string(), reason: reason.to_string() }
}
