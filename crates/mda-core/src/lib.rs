//! # MDA Diffusion Core Library
//!
//! Estimation of the hydrodynamic size of flexible bead chains from Monte Carlo
//! ensembles of chain conformations, using the Minimum Dissipation Approximation
//! (MDA) and the Kirkwood–Riseman approximation (KR) with bootstrap error bars.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`BeadSet`, `Conformation`),
//!   pairwise geometry, symmetric positive-definite inversion and the two closed-form
//!   size estimators. Also defines the traits through which the conformation generator
//!   and the hydrodynamic kernel are plugged in.
//!
//! - **[`engine`]: The Statistics Core.** Bootstrap resampling plans, the streaming
//!   per-replicate accumulator, estimation configuration, progress reporting and the
//!   reduction of replicate estimates to means and standard errors.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into the
//!   complete ensemble procedure.
//!
//! ## Usage
//!
//! ```ignore
//! use mdadiffusion::core::models::beads::BeadSet;
//! use mdadiffusion::engine::config::EstimationConfigBuilder;
//! use mdadiffusion::workflows::hydrodynamic_size;
//!
//! let beads = BeadSet::new(vec![1.0; 3], vec![1.0; 3])?;
//! let config = EstimationConfigBuilder::new()
//!     .ensemble_size(1000)
//!     .seed(42)
//!     .build()?;
//! let size = hydrodynamic_size::estimate(&beads, &config, &mut generator, &kernel)?;
//! println!("Rh (MDA) = {} ± {}", size.rh_mda, size.rh_mda_se);
//! ```

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_support;
