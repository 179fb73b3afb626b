use super::accumulator::BootstrapAccumulator;
use super::error::EngineError;
use crate::core::estimators::{
    EstimatorError, kirkwood_riseman_approximation, minimum_dissipation_approximation,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const RH_MDA: &str = "rh_mda";
pub const RH_MDA_SE: &str = "rh_mda (se)";
pub const RH_KR: &str = "rh_kr";
pub const RH_KR_SE: &str = "rh_kr (se)";

/// Mean of a bootstrap series and its spread across replicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    /// Population standard deviation of the replicate values.
    pub standard_error: f64,
}

impl Summary {
    /// Summarizes a non-empty series; `None` for an empty one.
    pub fn of(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        Some(Self {
            mean,
            standard_error: variance.sqrt(),
        })
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Hydrodynamic size estimates with their bootstrap standard errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HydrodynamicSize {
    #[serde(rename = "rh_mda")]
    pub rh_mda: f64,
    #[serde(rename = "rh_mda (se)")]
    pub rh_mda_se: f64,
    #[serde(rename = "rh_kr")]
    pub rh_kr: f64,
    #[serde(rename = "rh_kr (se)")]
    pub rh_kr_se: f64,
}

impl HydrodynamicSize {
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            (RH_MDA, self.rh_mda),
            (RH_MDA_SE, self.rh_mda_se),
            (RH_KR, self.rh_kr),
            (RH_KR_SE, self.rh_kr_se),
        ])
    }
}

/// Size estimates of every bootstrap replicate, in replicate order.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapEstimates {
    pub rh_mda: Vec<f64>,
    pub rh_kr: Vec<f64>,
}

impl BootstrapEstimates {
    /// Evaluates both estimators on the averages of every replicate.
    ///
    /// MDA is applied to the averaged trace mobility and KR to the averaged
    /// pairwise inverse distance.
    ///
    /// # Errors
    ///
    /// Fails on the first replicate that is empty or whose averages an
    /// estimator rejects.
    #[instrument(level = "debug", skip_all, name = "replicate_estimates")]
    pub fn from_accumulator(accumulator: &BootstrapAccumulator) -> Result<Self, EngineError> {
        let replicate_ids: Vec<usize> = (0..accumulator.bootstrap_rounds()).collect();

        #[cfg(not(feature = "parallel"))]
        let iterator = replicate_ids.iter();

        #[cfg(feature = "parallel")]
        let iterator = replicate_ids.par_iter();

        let estimates: Vec<Result<(f64, f64), EngineError>> = iterator
            .map(|&replicate| estimate_replicate(accumulator, replicate))
            .collect();

        let mut rh_mda = Vec::with_capacity(estimates.len());
        let mut rh_kr = Vec::with_capacity(estimates.len());
        for estimate in estimates {
            let (mda, kr) = estimate?;
            rh_mda.push(mda);
            rh_kr.push(kr);
        }

        debug!(replicates = rh_mda.len(), "Evaluated replicate estimators.");
        Ok(Self { rh_mda, rh_kr })
    }

    pub fn len(&self) -> usize {
        self.rh_mda.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rh_mda.is_empty()
    }

    /// Reduces the replicate series to means and population standard deviations.
    ///
    /// Returns `None` when there are no replicates.
    pub fn summarize(&self) -> Option<HydrodynamicSize> {
        let mda = Summary::of(&self.rh_mda)?;
        let kr = Summary::of(&self.rh_kr)?;
        Some(HydrodynamicSize {
            rh_mda: mda.mean,
            rh_mda_se: mda.standard_error,
            rh_kr: kr.mean,
            rh_kr_se: kr.standard_error,
        })
    }
}

fn estimate_replicate(
    accumulator: &BootstrapAccumulator,
    replicate: usize,
) -> Result<(f64, f64), EngineError> {
    let average = accumulator.replicate(replicate)?;
    let to_engine_error = |source: EstimatorError| EngineError::Estimator { replicate, source };

    let mda = minimum_dissipation_approximation(average.trace_mobility()).map_err(to_engine_error)?;
    let kr = kirkwood_riseman_approximation(average.inverse_distance()).map_err(to_engine_error)?;
    Ok((mda, kr))
}
