use nalgebra::Point3;

/// One spatial arrangement of a bead chain: the centre of every bead, in bead order.
///
/// Conformations are produced by a
/// [`ConformationGenerator`](crate::core::traits::ConformationGenerator), consumed
/// by a single ensemble iteration and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformation {
    positions: Vec<Point3<f64>>,
}

impl Conformation {
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self { positions }
    }

    /// Builds a conformation from `N×3` coordinate rows.
    pub fn from_rows(rows: &[[f64; 3]]) -> Self {
        Self {
            positions: rows.iter().map(|&[x, y, z]| Point3::new(x, y, z)).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }
}

impl From<Vec<Point3<f64>>> for Conformation {
    fn from(positions: Vec<Point3<f64>>) -> Self {
        Self::new(positions)
    }
}
