//! # Workflows Module
//!
//! High-level entry points that run the complete estimation procedure.
//!
//! ## Overview
//!
//! A workflow owns the ensemble loop: it draws the bootstrap resampling plan,
//! requests conformations from the generator, derives the per-conformer matrices,
//! folds them into the streaming accumulator and finally reduces the replicate
//! estimates to means and standard errors.
//!
//! - **Hydrodynamic Size Workflow** ([`hydrodynamic_size`]) - MDA and KR sizes with
//!   bootstrap standard errors

pub mod hydrodynamic_size;
