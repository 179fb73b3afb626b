use crate::core::geometry::{inverse_distances, pairwise_distances};
use crate::core::models::beads::BeadSet;
use crate::core::traits::{ConformationGenerator, MobilityKernel};
use crate::engine::accumulator::BootstrapAccumulator;
use crate::engine::config::{ConfigError, EstimationConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{ConsoleProgress, Progress, ProgressReporter};
use crate::engine::resampling::ResamplingPlan;
use crate::engine::statistics::{BootstrapEstimates, HydrodynamicSize};
use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// Runs the full estimation with a seeded random source and optional console progress.
///
/// The bootstrap resampling is seeded from `config.seed`, or from system entropy
/// when no seed is set. With `config.progress` enabled, progress is drawn on stderr.
pub fn estimate<G, K>(
    beads: &BeadSet,
    config: &EstimationConfig,
    generator: &mut G,
    kernel: &K,
) -> Result<HydrodynamicSize, EngineError>
where
    G: ConformationGenerator,
    K: MobilityKernel,
{
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let reporter = if config.progress {
        ProgressReporter::with_callback(ConsoleProgress::new().get_callback())
    } else {
        ProgressReporter::new()
    };
    run(beads, config, generator, kernel, &mut rng, &reporter)
}

/// Estimates the hydrodynamic size of `beads` from a freshly sampled ensemble.
///
/// Draws the bootstrap resampling plan from `rng`, samples `config.ensemble_size`
/// conformers one at a time and folds each into every replicate's running
/// averages. MDA is then evaluated on each replicate's averaged trace mobility and
/// KR on its averaged inverse distances, and both series are reduced to their mean
/// and population standard deviation.
///
/// # Errors
///
/// Stops at the first failure: an invalid configuration, a generator or kernel
/// error, malformed collaborator output, coincident beads, or an estimator
/// rejecting a replicate's averages. No partial result is returned.
#[instrument(skip_all, name = "hydrodynamic_size_workflow", fields(beads = beads.len()))]
pub fn run<G, K, R>(
    beads: &BeadSet,
    config: &EstimationConfig,
    generator: &mut G,
    kernel: &K,
    rng: &mut R,
    reporter: &ProgressReporter,
) -> Result<HydrodynamicSize, EngineError>
where
    G: ConformationGenerator,
    K: MobilityKernel,
    R: Rng,
{
    config.validate()?;
    info!(
        ensemble_size = config.ensemble_size,
        bootstrap_rounds = config.bootstrap_rounds,
        "Starting hydrodynamic size estimation."
    );

    let plan = ResamplingPlan::new(config.ensemble_size, config.bootstrap_rounds, rng);
    let accumulator = sample_ensemble(beads, plan, generator, kernel, reporter)?;
    let (_, size) = reduce(&accumulator, reporter)?;

    info!(
        rh_mda = size.rh_mda,
        rh_mda_se = size.rh_mda_se,
        rh_kr = size.rh_kr,
        rh_kr_se = size.rh_kr_se,
        "Estimation complete."
    );
    Ok(size)
}

/// Samples one conformer per entry of the plan's ensemble and accumulates it into
/// every bootstrap replicate.
#[instrument(skip_all, name = "ensemble_sampling")]
pub fn sample_ensemble<G, K>(
    beads: &BeadSet,
    plan: ResamplingPlan,
    generator: &mut G,
    kernel: &K,
    reporter: &ProgressReporter,
) -> Result<BootstrapAccumulator, EngineError>
where
    G: ConformationGenerator,
    K: MobilityKernel,
{
    let ensemble_size = plan.ensemble_size();
    let mut accumulator = BootstrapAccumulator::new(beads.len(), plan);

    reporter.report(Progress::SamplingStarted {
        ensemble_size: ensemble_size as u64,
    });

    for conformer_id in 0..ensemble_size {
        let (trace_mobility, inverse_distance) =
            conformer_matrices(conformer_id, beads, generator, kernel)?;
        accumulator.update(conformer_id, &trace_mobility, &inverse_distance)?;
        reporter.report(Progress::ConformerAccumulated);
    }

    reporter.report(Progress::SamplingFinished);
    debug!(
        weights = ?accumulator.weights(),
        "Ensemble sampling finished."
    );
    Ok(accumulator)
}

/// Evaluates the estimators on every replicate and summarizes them.
pub fn reduce(
    accumulator: &BootstrapAccumulator,
    reporter: &ProgressReporter,
) -> Result<(BootstrapEstimates, HydrodynamicSize), EngineError> {
    reporter.report(Progress::ReductionStarted {
        replicates: accumulator.bootstrap_rounds() as u64,
    });

    let estimates = BootstrapEstimates::from_accumulator(accumulator)?;
    let size = estimates
        .summarize()
        .ok_or(ConfigError::InvalidParameter {
            name: "bootstrap_rounds",
            reason: "at least one replicate is required",
        })?;

    reporter.report(Progress::ReductionFinished);
    Ok((estimates, size))
}

fn conformer_matrices<G, K>(
    conformer_id: usize,
    beads: &BeadSet,
    generator: &mut G,
    kernel: &K,
) -> Result<(DMatrix<f64>, DMatrix<f64>), EngineError>
where
    G: ConformationGenerator,
    K: MobilityKernel,
{
    let chain_length = beads.len();

    let conformation = generator
        .generate(beads.steric_radii())
        .map_err(|e| EngineError::Generation {
            conformer_id,
            source: Box::new(e),
        })?;
    if conformation.len() != chain_length {
        return Err(EngineError::MalformedConformation {
            conformer_id,
            expected: chain_length,
            found: conformation.len(),
        });
    }

    let distances = pairwise_distances(&conformation);
    let inverse_distance =
        inverse_distances(&distances).map_err(|source| EngineError::Geometry {
            conformer_id,
            source,
        })?;

    let trace_mobility = kernel
        .trace_mobility(&conformation, beads.hydrodynamic_radii())
        .map_err(|e| EngineError::Kernel {
            conformer_id,
            source: Box::new(e),
        })?;
    let (rows, cols) = trace_mobility.shape();
    if rows != chain_length || cols != chain_length {
        return Err(EngineError::MalformedMobility {
            conformer_id,
            expected: chain_length,
            rows,
            cols,
        });
    }
    if trace_mobility.iter().any(|m| !m.is_finite()) {
        return Err(EngineError::NonFiniteMobility { conformer_id });
    }

    Ok((trace_mobility, inverse_distance))
}
