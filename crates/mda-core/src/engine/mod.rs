//! # Engine Module
//!
//! This module implements the statistical engine behind the hydrodynamic size
//! estimate: bootstrap resampling, streaming ensemble averages and the reduction
//! of per-replicate estimates to means and standard errors.
//!
//! ## Overview
//!
//! Conformers are never stored. Each one updates, in place, the running weighted
//! averages of every bootstrap replicate that contains it. Replicate 0 weights every
//! conformer once and therefore tracks the plain ensemble average; the remaining
//! replicates follow resampling plans drawn with replacement.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Ensemble size, bootstrap rounds, seeding and run files
//! - **Resampling** ([`resampling`]) - Per-replicate conformer weights
//! - **Accumulation** ([`accumulator`]) - Running weighted averages per replicate
//! - **Statistics** ([`statistics`]) - Replicate estimators and their bootstrap summary
//! - **Progress Monitoring** ([`progress`]) - Progress events and console rendering
//! - **Error Handling** ([`error`]) - Engine-level error type

pub mod accumulator;
pub mod config;
pub mod error;
pub mod progress;
pub mod resampling;
pub mod statistics;
