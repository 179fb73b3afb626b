use crate::core::models::beads::{BeadSet, BeadSetError};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BOOTSTRAP_ROUNDS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum RunFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid bead set: {0}")]
    Beads(#[from] BeadSetError),
    #[error("Invalid estimation settings: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationConfig {
    /// Number of conformers sampled.
    pub ensemble_size: usize,
    /// Number of bootstrap replicates, including the unweighted replicate 0.
    pub bootstrap_rounds: usize,
    /// Seed for the bootstrap resampling; fresh entropy when absent.
    pub seed: Option<u64>,
    /// Render a console progress bar while sampling.
    pub progress: bool,
}

#[derive(Default)]
pub struct EstimationConfigBuilder {
    ensemble_size: Option<usize>,
    bootstrap_rounds: Option<usize>,
    seed: Option<u64>,
    progress: Option<bool>,
}

impl EstimationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensemble_size(mut self, size: usize) -> Self {
        self.ensemble_size = Some(size);
        self
    }
    pub fn bootstrap_rounds(mut self, rounds: usize) -> Self {
        self.bootstrap_rounds = Some(rounds);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = Some(enabled);
        self
    }

    pub fn build(self) -> Result<EstimationConfig, ConfigError> {
        let config = EstimationConfig {
            ensemble_size: self
                .ensemble_size
                .ok_or(ConfigError::MissingParameter("ensemble_size"))?,
            bootstrap_rounds: self.bootstrap_rounds.unwrap_or(DEFAULT_BOOTSTRAP_ROUNDS),
            seed: self.seed,
            progress: self.progress.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }
}

impl EstimationConfig {
    /// Checks that the ensemble and the replicate set are non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ensemble_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "ensemble_size",
                reason: "at least one conformer is required",
            });
        }
        if self.bootstrap_rounds == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "bootstrap_rounds",
                reason: "at least one replicate is required",
            });
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileBeads {
    steric_radii: Vec<f64>,
    hydrodynamic_radii: Vec<f64>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileEstimation {
    ensemble_size: usize,
    bootstrap_rounds: Option<usize>,
    seed: Option<u64>,
    progress: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct RunFile {
    beads: FileBeads,
    estimation: FileEstimation,
}

/// Parses a TOML run description into a bead set and estimation settings.
///
/// ```toml
/// [beads]
/// steric-radii = [1.0, 1.0, 1.0]
/// hydrodynamic-radii = [1.0, 1.0, 1.0]
///
/// [estimation]
/// ensemble-size = 1000
/// bootstrap-rounds = 10
/// seed = 42
/// progress = true
/// ```
///
/// `bootstrap-rounds`, `seed` and `progress` are optional.
pub fn parse_run_file(content: &str) -> Result<(BeadSet, EstimationConfig), RunFileError> {
    let file: RunFile = toml::from_str(content)?;

    let beads = BeadSet::new(file.beads.steric_radii, file.beads.hydrodynamic_radii)?;

    let mut builder = EstimationConfigBuilder::new().ensemble_size(file.estimation.ensemble_size);
    if let Some(rounds) = file.estimation.bootstrap_rounds {
        builder = builder.bootstrap_rounds(rounds);
    }
    if let Some(seed) = file.estimation.seed {
        builder = builder.seed(seed);
    }
    if let Some(progress) = file.estimation.progress {
        builder = builder.progress(progress);
    }
    let config = builder.build()?;

    debug!(
        beads = beads.len(),
        ensemble_size = config.ensemble_size,
        bootstrap_rounds = config.bootstrap_rounds,
        "Parsed run file."
    );
    Ok((beads, config))
}

pub fn load_run_file(path: &Path) -> Result<(BeadSet, EstimationConfig), RunFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| RunFileError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    parse_run_file(&content)
}
