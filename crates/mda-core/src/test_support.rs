//! Stand-in collaborators for exercising the ensemble workflow in tests.

use crate::core::models::conformation::Conformation;
use crate::core::traits::{ConformationGenerator, MobilityKernel};
use nalgebra::{DMatrix, Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use thiserror::Error;

const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

#[derive(Debug, Error)]
#[error("Could not place bead {bead} without overlap after {attempts} attempts")]
pub struct PlacementStalled {
    pub bead: usize,
    pub attempts: usize,
}

#[derive(Debug, Error)]
#[error("Beads {i} and {j} overlap")]
pub struct OverlappingBeads {
    pub i: usize,
    pub j: usize,
}

/// Chain of touching spheres with uniformly random bond directions, rejecting
/// placements that overlap an earlier bead.
pub struct TouchingSphereChain {
    rng: StdRng,
}

impl TouchingSphereChain {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn random_direction(&mut self) -> Vector3<f64> {
        loop {
            let v = Vector3::new(
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(-1.0..1.0),
            );
            let norm = v.norm();
            if norm > 1e-6 && norm <= 1.0 {
                return v / norm;
            }
        }
    }
}

impl ConformationGenerator for TouchingSphereChain {
    type Error = PlacementStalled;

    fn generate(&mut self, steric_radii: &[f64]) -> Result<Conformation, PlacementStalled> {
        let mut positions: Vec<Point3<f64>> = Vec::with_capacity(steric_radii.len());
        for (bead, &radius) in steric_radii.iter().enumerate() {
            let Some(previous) = positions.last().copied() else {
                positions.push(Point3::origin());
                continue;
            };
            let bond = steric_radii[bead - 1] + radius;

            let mut placed = false;
            for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                let candidate = previous + self.random_direction() * bond;
                let overlaps = positions
                    .iter()
                    .zip(steric_radii)
                    .any(|(p, &r)| (p - candidate).norm() < r + radius - 1e-9);
                if !overlaps {
                    positions.push(candidate);
                    placed = true;
                    break;
                }
            }
            if !placed {
                return Err(PlacementStalled {
                    bead,
                    attempts: MAX_PLACEMENT_ATTEMPTS,
                });
            }
        }
        Ok(Conformation::new(positions))
    }
}

/// Beadwise trace of the Rotne–Prager mobility for non-overlapping beads in a
/// unit-viscosity fluid: `1/(2πa)` on the diagonal and `1/(2πr)` off it.
pub struct RotnePragerTrace;

impl MobilityKernel for RotnePragerTrace {
    type Error = OverlappingBeads;

    fn trace_mobility(
        &self,
        conformation: &Conformation,
        hydrodynamic_radii: &[f64],
    ) -> Result<DMatrix<f64>, OverlappingBeads> {
        let positions = conformation.positions();
        let n = positions.len();
        let mut mobility = DMatrix::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    mobility[(i, j)] = 1.0 / (2.0 * PI * hydrodynamic_radii[i]);
                    continue;
                }
                let r = (positions[i] - positions[j]).norm();
                if r < hydrodynamic_radii[i] + hydrodynamic_radii[j] - 1e-9 {
                    return Err(OverlappingBeads {
                        i: i.min(j),
                        j: i.max(j),
                    });
                }
                mobility[(i, j)] = 1.0 / (2.0 * PI * r);
            }
        }
        Ok(mobility)
    }
}
