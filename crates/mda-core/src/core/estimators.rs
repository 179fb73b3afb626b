use super::linalg::{LinalgError, invert_positive_definite};
use nalgebra::DMatrix;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum EstimatorError {
    #[error("Matrix inversion failed: {source}")]
    Linalg {
        #[from]
        source: LinalgError,
    },
    #[error("Expected a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Kirkwood-Riseman approximation needs at least two beads, got {beads}")]
    DegenerateChain { beads: usize },
}

/// Hydrodynamic size in the Minimum Dissipation Approximation.
///
/// Computes `Σ_ij (M⁻¹)_ij / 2π` for the ensemble average `M` of the beadwise
/// trace of the mobility matrix.
///
/// Cichocki, B., Rubin, M., Niedzwiecka, A. & Szymczak, P.
/// Diffusion coefficients of elastic macromolecules. J. Fluid Mech. 878, R3 (2019).
///
/// # Errors
///
/// `average_trace_mobility` must be symmetric positive-definite; otherwise the
/// inversion error is returned.
pub fn minimum_dissipation_approximation(
    average_trace_mobility: &DMatrix<f64>,
) -> Result<f64, EstimatorError> {
    let inverse = invert_positive_definite(average_trace_mobility)?;
    Ok(inverse.sum() / (2.0 * PI))
}

/// Hydrodynamic size in the Kirkwood–Riseman approximation.
///
/// Computes `N(N−1) / Σ_ij ⟨1/r_ij⟩` for the ensemble average of the pairwise
/// inverse distances (zeros on the diagonal).
///
/// Kirkwood, J. G. & Riseman, J. The intrinsic viscosities and diffusion constants
/// of flexible macromolecules in solution. J. Chem. Phys. 16, 565–573 (1948).
pub fn kirkwood_riseman_approximation(
    average_pairwise_inverse_distance: &DMatrix<f64>,
) -> Result<f64, EstimatorError> {
    let (rows, cols) = average_pairwise_inverse_distance.shape();
    if rows != cols {
        return Err(EstimatorError::NotSquare { rows, cols });
    }
    if rows < 2 {
        return Err(EstimatorError::DegenerateChain { beads: rows });
    }

    let chain_length = rows as f64;
    Ok(chain_length * (chain_length - 1.0) / average_pairwise_inverse_distance.sum())
}
