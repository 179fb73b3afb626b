use crate::core::models::conformation::Conformation;
use nalgebra::DMatrix;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GeometryError {
    #[error("Beads {i} and {j} coincide; their inverse distance is undefined")]
    CoincidentBeads { i: usize, j: usize },
    #[error("Distance between beads {i} and {j} is not a finite number")]
    NonFiniteDistance { i: usize, j: usize },
}

/// Euclidean distances between all pairs of bead centres.
///
/// The result is symmetric with a zero diagonal.
pub fn pairwise_distances(conformation: &Conformation) -> DMatrix<f64> {
    let positions = conformation.positions();
    let n = positions.len();
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            0.0
        } else {
            (positions[i] - positions[j]).norm()
        }
    })
}

/// Element-wise `1 / d_ij` of a distance matrix with the self terms excluded.
///
/// Diagonal entries are exactly zero. Zero and non-finite off-diagonal
/// distances are rejected.
pub fn inverse_distances(distances: &DMatrix<f64>) -> Result<DMatrix<f64>, GeometryError> {
    let n = distances.nrows();
    let mut inverse = DMatrix::zeros(n, n);
    for j in 0..n {
        for i in 0..n {
            if i == j {
                continue;
            }
            let d = distances[(i, j)];
            let (lo, hi) = (i.min(j), i.max(j));
            if !d.is_finite() {
                return Err(GeometryError::NonFiniteDistance { i: lo, j: hi });
            }
            if d <= 0.0 {
                return Err(GeometryError::CoincidentBeads { i: lo, j: hi });
            }
            inverse[(i, j)] = d.recip();
        }
    }
    Ok(inverse)
}

pub fn pairwise_inverse_distances(
    conformation: &Conformation,
) -> Result<DMatrix<f64>, GeometryError> {
    inverse_distances(&pairwise_distances(conformation))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn right_triangle() -> Conformation {
        Conformation::from_rows(&[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 4.0, 0.0]])
    }

    #[test]
    fn pairwise_distances_are_symmetric_with_zero_diagonal() {
        let distances = pairwise_distances(&right_triangle());
        assert_eq!(distances.shape(), (3, 3));
        for i in 0..3 {
            assert_eq!(distances[(i, i)], 0.0);
            for j in 0..3 {
                assert_eq!(distances[(i, j)], distances[(j, i)]);
            }
        }
        assert!(f64_approx_equal(distances[(0, 1)], 3.0));
        assert!(f64_approx_equal(distances[(0, 2)], 4.0));
        assert!(f64_approx_equal(distances[(1, 2)], 5.0));
    }

    #[test]
    fn pairwise_inverse_distances_invert_off_diagonal_entries_only() {
        let inverse = pairwise_inverse_distances(&right_triangle()).unwrap();
        for i in 0..3 {
            assert_eq!(inverse[(i, i)], 0.0);
        }
        assert!(f64_approx_equal(inverse[(0, 1)], 1.0 / 3.0));
        assert!(f64_approx_equal(inverse[(2, 0)], 1.0 / 4.0));
        assert!(f64_approx_equal(inverse[(1, 2)], 1.0 / 5.0));
    }

    #[test]
    fn pairwise_inverse_distances_of_single_bead_is_zero() {
        let inverse =
            pairwise_inverse_distances(&Conformation::from_rows(&[[1.0, 1.0, 1.0]])).unwrap();
        assert_eq!(inverse, DMatrix::zeros(1, 1));
    }

    #[test]
    fn coincident_beads_are_reported() {
        let conformation =
            Conformation::from_rows(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        let result = pairwise_inverse_distances(&conformation);
        assert_eq!(result, Err(GeometryError::CoincidentBeads { i: 0, j: 2 }));
    }

    #[test]
    fn non_finite_coordinates_are_reported() {
        let conformation =
            Conformation::from_rows(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0]]);
        let result = pairwise_inverse_distances(&conformation);
        assert_eq!(result, Err(GeometryError::NonFiniteDistance { i: 0, j: 2 }));
    }

    #[test]
    fn infinite_distance_is_reported() {
        let distances = DMatrix::from_row_slice(2, 2, &[0.0, f64::INFINITY, f64::INFINITY, 0.0]);
        assert_eq!(
            inverse_distances(&distances),
            Err(GeometryError::NonFiniteDistance { i: 0, j: 1 })
        );
    }
}
