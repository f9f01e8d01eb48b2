use thiserror::Error;

use crate::scene::NodeId;
use crate::Num;

pub type OrreryResult<T> = Result<T, OrreryError>;

#[derive(Debug, Error)]
pub enum OrreryError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("node {0:?} does not belong to this scene")]
    UnknownNode(NodeId),
}

/// Problems found while validating a [`SystemConfig`](crate::SystemConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("body '{id}' has invalid radius {radius}")]
    InvalidRadius { id: String, radius: Num },

    #[error("body '{id}' has invalid orbit distance {distance}")]
    InvalidOrbitDistance { id: String, distance: Num },

    #[error("body '{id}' has non-finite angular rate")]
    NonFiniteRate { id: String },

    #[error("body '{id}' has ring with inner radius {inner} >= outer radius {outer}")]
    InvalidRing { id: String, inner: Num, outer: Num },

    #[error("body id '{0}' is used more than once")]
    DuplicateId(String),

    #[error("body id must not be empty")]
    EmptyId,

    #[error("tour references unknown body '{0}'")]
    UnknownTourStop(String),

    #[error("{name} must be in (0, 1], got {value}")]
    InvalidFactor { name: &'static str, value: Num },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: Num },

    #[error("zoom limits are inverted: min {min} > max {max}")]
    InvalidZoomLimits { min: Num, max: Num },
}
