//! `DistributionConfig`: declarative description of a time distribution.
//!
//! Model files describe each reaction's law as data; the application turns
//! that into a live [`TimeDistribution`] with [`DistributionConfig::build`],
//! supplying the start time and the run's shared random stream.  With the
//! `serde` feature the config deserializes from an internally tagged map:
//!
//! ```text
//! { "type": "exponential", "rate": 2.0 }
//! { "type": "any_real", "law": "gamma", "parameters": [2.0, 0.5] }
//! { "type": "trigger", "at": 10.0 }
//! ```

use tau_core::{SharedRng, Time};

use crate::{
    AnyRealDistribution, DiracComb, DistributionResult, ExponentialTime, Immediately, RealLaw,
    TimeDistribution, Trigger,
};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum DistributionConfig {
    /// Markovian events at base `rate`, scaled by condition propensities.
    Exponential { rate: f64 },
    /// `rate` evenly spaced events per time unit.
    DiracComb { rate: f64 },
    /// Waiting times from a named [`RealLaw`].
    AnyReal { law: String, parameters: Vec<f64> },
    /// A single event at absolute time `at`.
    Trigger { at: Time },
    /// Always due.
    Immediately,
}

impl DistributionConfig {
    /// Instantiate the distribution, gated at `start`.
    ///
    /// `Trigger` ignores `start` (its time is absolute) and `Immediately`
    /// ignores both arguments.
    pub fn build(&self, start: Time, rng: &SharedRng) -> DistributionResult<TimeDistribution> {
        Ok(match self {
            DistributionConfig::Exponential { rate } => {
                ExponentialTime::new(*rate, start, rng.clone())?.into()
            }
            DistributionConfig::DiracComb { rate } => DiracComb::new(start, *rate)?.into(),
            DistributionConfig::AnyReal { law, parameters } => {
                let law = RealLaw::from_name(law, parameters)?;
                AnyRealDistribution::new(start, Box::new(law), rng.clone()).into()
            }
            DistributionConfig::Trigger { at } => Trigger::new(*at).into(),
            DistributionConfig::Immediately => Immediately::new().into(),
        })
    }
}
