use crate::core::models::conformation::Conformation;
use nalgebra::DMatrix;
use std::error::Error;

/// Draws random conformations of a bead chain.
///
/// This is the seam through which a self-avoiding chain sampler is plugged into
/// the ensemble workflow. Each call must return a fresh, independent conformation
/// with one bead centre per steric radius, in bead order.
///
/// Any `FnMut(&[f64]) -> Result<Conformation, E>` closure is a generator.
pub trait ConformationGenerator {
    /// The error type reported when a conformation cannot be produced.
    type Error: Error + Send + Sync + 'static;

    /// Generates one conformation for beads with the given steric radii.
    ///
    /// # Arguments
    ///
    /// * `steric_radii` - Excluded-volume radius of every bead, in bead order.
    ///
    /// # Errors
    ///
    /// Returns an error if the radii are unusable or sampling fails. The workflow
    /// treats any such error as fatal.
    fn generate(&mut self, steric_radii: &[f64]) -> Result<Conformation, Self::Error>;
}

/// Computes the beadwise trace of the hydrodynamic mobility matrix.
///
/// Entry `(i, j)` of the returned `N×N` matrix is the trace of the `3×3`
/// translational mobility block coupling beads `i` and `j`. The matrix must be
/// symmetric, and its ensemble average positive-definite, for the Minimum
/// Dissipation Approximation to be defined.
///
/// Any `Fn(&Conformation, &[f64]) -> Result<DMatrix<f64>, E>` closure is a kernel.
pub trait MobilityKernel {
    /// The error type reported when the mobility cannot be evaluated.
    type Error: Error + Send + Sync + 'static;

    /// Evaluates the trace mobility matrix of one conformation.
    ///
    /// # Arguments
    ///
    /// * `conformation` - Bead centres.
    /// * `hydrodynamic_radii` - Hydrodynamic radius of every bead, in bead order.
    fn trace_mobility(
        &self,
        conformation: &Conformation,
        hydrodynamic_radii: &[f64],
    ) -> Result<DMatrix<f64>, Self::Error>;
}

impl<F, E> ConformationGenerator for F
where
    F: FnMut(&[f64]) -> Result<Conformation, E>,
    E: Error + Send + Sync + 'static,
{
    type Error = E;

    fn generate(&mut self, steric_radii: &[f64]) -> Result<Conformation, E> {
        self(steric_radii)
    }
}

impl<F, E> MobilityKernel for F
where
    F: Fn(&Conformation, &[f64]) -> Result<DMatrix<f64>, E>,
    E: Error + Send + Sync + 'static,
{
    type Error = E;

    fn trace_mobility(
        &self,
        conformation: &Conformation,
        hydrodynamic_radii: &[f64],
    ) -> Result<DMatrix<f64>, E> {
        self(conformation, hydrodynamic_radii)
    }
}
