use tau_core::{CoreError, Time};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("{distribution} rate must be positive, got {rate}")]
    InvalidRate {
        distribution: &'static str,
        rate:         f64,
    },

    #[error("{distribution} tried to schedule a reaction in the past: current time is {now}, new scheduled time is {next}")]
    TimeRegression {
        distribution: &'static str,
        now:          Time,
        next:         Time,
    },

    #[error("could not clone this time distribution, as {type_name} cannot be cloned")]
    UncloneableDistribution { type_name: &'static str },

    #[error("unknown real distribution {0:?}")]
    UnknownLaw(String),

    #[error("invalid parameters for {law}: {reason}")]
    InvalidLawParameters { law: String, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type DistributionResult<T> = Result<T, DistributionError>;
