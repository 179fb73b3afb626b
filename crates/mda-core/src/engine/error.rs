use super::config::ConfigError;
use crate::core::estimators::EstimatorError;
use crate::core::geometry::GeometryError;
use std::error::Error as StdError;
use thiserror::Error;

pub type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Conformation generator failed on conformer {conformer_id}: {source}")]
    Generation {
        conformer_id: usize,
        #[source]
        source: BoxedError,
    },

    #[error("Mobility kernel failed on conformer {conformer_id}: {source}")]
    Kernel {
        conformer_id: usize,
        #[source]
        source: BoxedError,
    },

    #[error(
        "Conformation generator returned {found} bead positions for conformer {conformer_id}, expected {expected}"
    )]
    MalformedConformation {
        conformer_id: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "Mobility kernel returned a {rows}x{cols} matrix for conformer {conformer_id}, expected {expected}x{expected}"
    )]
    MalformedMobility {
        conformer_id: usize,
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Mobility kernel returned non-finite entries for conformer {conformer_id}")]
    NonFiniteMobility { conformer_id: usize },

    #[error("Invalid geometry of conformer {conformer_id}: {source}")]
    Geometry {
        conformer_id: usize,
        #[source]
        source: GeometryError,
    },

    #[error("Conformer {conformer_id} is outside the resampled ensemble of size {ensemble_size}")]
    ConformerOutOfRange {
        conformer_id: usize,
        ensemble_size: usize,
    },

    #[error("Matrix of shape {rows}x{cols} does not match chain length {expected}")]
    DimensionMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Bootstrap replicate {replicate} has no accumulated weight")]
    EmptyReplicate { replicate: usize },

    #[error("Size estimator failed on bootstrap replicate {replicate}: {source}")]
    Estimator {
        replicate: usize,
        #[source]
        source: EstimatorError,
    },
}
