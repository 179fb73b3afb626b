use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BeadSetError {
    #[error("Bead set must contain at least one bead")]
    Empty,
    #[error(
        "Radius sequences are not aligned: {steric} steric radii but {hydrodynamic} hydrodynamic radii"
    )]
    LengthMismatch { steric: usize, hydrodynamic: usize },
}

/// An ordered chain of beads with per-bead steric and hydrodynamic radii.
///
/// The steric radii are handed to the conformation generator and the
/// hydrodynamic radii to the mobility kernel. Both sequences always have the
/// same length and are aligned by bead index.
///
/// Positivity of the radii is not checked here; generators and kernels reject
/// radii they cannot work with.
#[derive(Debug, Clone, PartialEq)]
pub struct BeadSet {
    steric_radii: Vec<f64>,
    hydrodynamic_radii: Vec<f64>,
}

impl BeadSet {
    /// Creates a bead set from aligned radius sequences.
    ///
    /// # Errors
    ///
    /// Returns [`BeadSetError::LengthMismatch`] if the sequences differ in length
    /// and [`BeadSetError::Empty`] if both are empty.
    pub fn new(steric_radii: Vec<f64>, hydrodynamic_radii: Vec<f64>) -> Result<Self, BeadSetError> {
        if steric_radii.len() != hydrodynamic_radii.len() {
            return Err(BeadSetError::LengthMismatch {
                steric: steric_radii.len(),
                hydrodynamic: hydrodynamic_radii.len(),
            });
        }
        if steric_radii.is_empty() {
            return Err(BeadSetError::Empty);
        }
        Ok(Self {
            steric_radii,
            hydrodynamic_radii,
        })
    }

    /// Creates a bead set where every bead has the same steric and hydrodynamic radius.
    pub fn uniform(chain_length: usize, radius: f64) -> Result<Self, BeadSetError> {
        Self::new(vec![radius; chain_length], vec![radius; chain_length])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steric_radii.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steric_radii.is_empty()
    }

    #[inline]
    pub fn steric_radii(&self) -> &[f64] {
        &self.steric_radii
    }

    #[inline]
    pub fn hydrodynamic_radii(&self) -> &[f64] {
        &self.hydrodynamic_radii
    }
}
