//! # Core Module
//!
//! This module provides the stateless building blocks of the hydrodynamic size
//! estimation: the bead chain data models, pairwise geometry, linear algebra and
//! the closed-form size estimators.
//!
//! ## Architecture
//!
//! - **Chain Representation** ([`models`]) - Bead radii and bead centre coordinates
//! - **Pairwise Geometry** ([`geometry`]) - Distance and inverse-distance matrices
//! - **Linear Algebra** ([`linalg`]) - Cholesky-based inversion of positive-definite matrices
//! - **Size Estimators** ([`estimators`]) - Minimum Dissipation and Kirkwood–Riseman approximations
//! - **Collaborator Interfaces** ([`traits`]) - Conformation generators and hydrodynamic kernels
//!
//! ## Scientific Foundation
//!
//! - **Kirkwood–Riseman approximation** - Kirkwood, J. G. & Riseman, J., J. Chem. Phys. 16, 565–573 (1948)
//! - **Minimum Dissipation Approximation** - Cichocki, B., Rubin, M., Niedzwiecka, A. & Szymczak, P.,
//!   J. Fluid Mech. 878, R3 (2019)

pub mod estimators;
pub mod geometry;
pub mod linalg;
pub mod models;
pub mod traits;
