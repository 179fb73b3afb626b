use nalgebra::{Cholesky, DMatrix};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum LinalgError {
    #[error("Expected a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Matrix of order {order} is not positive-definite; Cholesky factorization failed")]
    NotPositiveDefinite { order: usize },
    #[error("Cholesky factor of order {order} is singular")]
    SingularFactor { order: usize },
}

/// Inverts a symmetric positive-definite matrix through its Cholesky factor.
///
/// The matrix is factored as `M = L·Lᵀ`, the triangular factor is inverted and
/// `M⁻¹ = L⁻ᵀ·L⁻¹` is formed. The lower triangle of the result is then overwritten
/// with the mirrored upper triangle, so the returned inverse is exactly symmetric.
///
/// Only the lower triangle of `matrix` is read by the factorization.
///
/// # Errors
///
/// Returns [`LinalgError::NotSquare`] for rectangular input and
/// [`LinalgError::NotPositiveDefinite`] when the factorization breaks down.
pub fn invert_positive_definite(matrix: &DMatrix<f64>) -> Result<DMatrix<f64>, LinalgError> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }

    let cholesky = Cholesky::new(matrix.clone())
        .ok_or(LinalgError::NotPositiveDefinite { order: rows })?;
    let l_inv = cholesky
        .l()
        .solve_lower_triangular(&DMatrix::identity(rows, rows))
        .ok_or(LinalgError::SingularFactor { order: rows })?;

    let mut inverse = l_inv.tr_mul(&l_inv);
    inverse.fill_lower_triangle_with_upper_triangle();

    trace!(order = rows, "Inverted positive-definite matrix.");
    Ok(inverse)
}
