//! # Core Models Module
//!
//! Data structures describing the bead chain whose hydrodynamic size is estimated.
//!
//! ## Key Components
//!
//! - [`beads`] - The ordered bead set with aligned steric and hydrodynamic radii
//! - [`conformation`] - One spatial arrangement of the bead centres
//!
//! ## Usage
//!
//! ```ignore
//! use mdadiffusion::core::models::{beads::BeadSet, conformation::Conformation};
//! use nalgebra::Point3;
//!
//! let beads = BeadSet::new(vec![1.0, 1.0], vec![0.8, 0.8])?;
//! let conformation = Conformation::new(vec![Point3::origin(), Point3::new(2.0, 0.0, 0.0)]);
//! assert_eq!(beads.len(), conformation.len());
//! ```

pub mod beads;
pub mod conformation;
