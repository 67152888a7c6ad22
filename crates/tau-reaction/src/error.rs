use tau_core::{CoreError, NodeId, ReactionId};
use tau_distribution::DistributionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReactionError {
    #[error("putative execution time of a reaction on {node} requested before initialization completed")]
    UninitializedAccess { node: NodeId },

    #[error("{reaction} does not support {distribution} time distributions")]
    IncompatibleCloneTarget {
        reaction:     &'static str,
        distribution: &'static str,
    },

    #[error("no reaction {0} on this node")]
    ReactionNotFound(ReactionId),

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ReactionResult<T> = Result<T, ReactionError>;
