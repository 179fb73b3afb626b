use rand::Rng;
use tracing::{debug, instrument};

/// Conformer weights of every bootstrap replicate.
///
/// Replicate 0 is the identity resampling: each conformer appears exactly once.
/// Every other replicate draws `ensemble_size` conformer indices uniformly with
/// replacement, and the weight of a conformer is its multiplicity among those
/// draws. Multiplicities are counted once up front, so a weight lookup during the
/// ensemble loop is a single index operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResamplingPlan {
    ensemble_size: usize,
    weights: Vec<Vec<u32>>,
}

impl ResamplingPlan {
    #[instrument(level = "debug", skip(rng))]
    pub fn new(ensemble_size: usize, bootstrap_rounds: usize, rng: &mut impl Rng) -> Self {
        let mut weights = Vec::with_capacity(bootstrap_rounds);
        if bootstrap_rounds > 0 {
            weights.push(vec![1; ensemble_size]);
        }
        for _ in 1..bootstrap_rounds {
            let mut counts = vec![0u32; ensemble_size];
            for _ in 0..ensemble_size {
                counts[rng.gen_range(0..ensemble_size)] += 1;
            }
            weights.push(counts);
        }

        debug!(
            replicates = weights.len(),
            "Drew bootstrap resampling vectors."
        );
        Self {
            ensemble_size,
            weights,
        }
    }

    /// Builds a plan from explicit index vectors, one per replicate.
    ///
    /// Returns `None` if any index is outside `0..ensemble_size`.
    pub fn from_index_vectors(ensemble_size: usize, vectors: &[Vec<usize>]) -> Option<Self> {
        let mut weights = Vec::with_capacity(vectors.len());
        for vector in vectors {
            let mut counts = vec![0u32; ensemble_size];
            for &conformer_id in vector {
                *counts.get_mut(conformer_id)? += 1;
            }
            weights.push(counts);
        }
        Some(Self {
            ensemble_size,
            weights,
        })
    }

    #[inline]
    pub fn ensemble_size(&self) -> usize {
        self.ensemble_size
    }

    #[inline]
    pub fn bootstrap_rounds(&self) -> usize {
        self.weights.len()
    }

    /// Multiplicity of `conformer_id` in replicate `replicate`.
    ///
    /// Out-of-range conformers carry no weight.
    #[inline]
    pub fn weight(&self, replicate: usize, conformer_id: usize) -> u32 {
        self.weights
            .get(replicate)
            .and_then(|counts| counts.get(conformer_id))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of the weights of a replicate.
    pub fn total_weight(&self, replicate: usize) -> u64 {
        self.weights
            .get(replicate)
            .map(|counts| counts.iter().map(|&w| u64::from(w)).sum())
            .unwrap_or(0)
    }
}
