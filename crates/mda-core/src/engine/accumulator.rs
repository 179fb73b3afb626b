use super::error::EngineError;
use super::resampling::ResamplingPlan;
use nalgebra::DMatrix;
use tracing::trace;

/// Running weighted averages of one bootstrap replicate.
///
/// After any sequence of [`accumulate`](Self::accumulate) calls the stored
/// matrices equal `Σ wᵢ·Xᵢ / Σ wᵢ` over the accumulated samples, up to rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicateAverage {
    trace_mobility: DMatrix<f64>,
    inverse_distance: DMatrix<f64>,
    weight: u64,
}

impl ReplicateAverage {
    pub fn new(chain_length: usize) -> Self {
        Self {
            trace_mobility: DMatrix::zeros(chain_length, chain_length),
            inverse_distance: DMatrix::zeros(chain_length, chain_length),
            weight: 0,
        }
    }

    /// Folds one weighted sample into both running averages.
    ///
    /// With `W` the weight accumulated so far and `w` the sample weight, each
    /// average becomes `(W/(W+w))·avg + (w/(W+w))·sample`. A zero weight leaves
    /// the replicate untouched.
    pub fn accumulate(
        &mut self,
        weight: u32,
        trace_mobility: &DMatrix<f64>,
        inverse_distance: &DMatrix<f64>,
    ) {
        if weight == 0 {
            return;
        }
        let prev_weight = self.weight as f64;
        let new_weight = self.weight + u64::from(weight);
        let keep = prev_weight / new_weight as f64;
        let take = f64::from(weight) / new_weight as f64;

        self.trace_mobility
            .zip_apply(trace_mobility, |avg, x| *avg = keep * *avg + take * x);
        self.inverse_distance
            .zip_apply(inverse_distance, |avg, x| *avg = keep * *avg + take * x);
        self.weight = new_weight;
    }

    #[inline]
    pub fn weight(&self) -> u64 {
        self.weight
    }

    #[inline]
    pub fn trace_mobility(&self) -> &DMatrix<f64> {
        &self.trace_mobility
    }

    #[inline]
    pub fn inverse_distance(&self) -> &DMatrix<f64> {
        &self.inverse_distance
    }
}

/// Streaming ensemble averages for every bootstrap replicate.
///
/// Conformers are folded in one at a time through [`update`](Self::update) and
/// never stored; memory use is independent of the ensemble size apart from the
/// resampling plan.
#[derive(Debug, Clone)]
pub struct BootstrapAccumulator {
    chain_length: usize,
    plan: ResamplingPlan,
    replicates: Vec<ReplicateAverage>,
}

impl BootstrapAccumulator {
    pub fn new(chain_length: usize, plan: ResamplingPlan) -> Self {
        let replicates = (0..plan.bootstrap_rounds())
            .map(|_| ReplicateAverage::new(chain_length))
            .collect();
        Self {
            chain_length,
            plan,
            replicates,
        }
    }

    /// Adds conformer `conformer_id` to every replicate, weighted by its
    /// multiplicity in that replicate's resampling.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConformerOutOfRange`] if the conformer index is not
    /// covered by the plan and [`EngineError::DimensionMismatch`] if a matrix is
    /// not `chain_length × chain_length`.
    pub fn update(
        &mut self,
        conformer_id: usize,
        trace_mobility: &DMatrix<f64>,
        inverse_distance: &DMatrix<f64>,
    ) -> Result<(), EngineError> {
        if conformer_id >= self.plan.ensemble_size() {
            return Err(EngineError::ConformerOutOfRange {
                conformer_id,
                ensemble_size: self.plan.ensemble_size(),
            });
        }
        self.check_shape(trace_mobility)?;
        self.check_shape(inverse_distance)?;

        for (replicate, average) in self.replicates.iter_mut().enumerate() {
            let weight = self.plan.weight(replicate, conformer_id);
            average.accumulate(weight, trace_mobility, inverse_distance);
        }
        trace!(conformer_id, "Accumulated conformer into all replicates.");
        Ok(())
    }

    fn check_shape(&self, matrix: &DMatrix<f64>) -> Result<(), EngineError> {
        let (rows, cols) = matrix.shape();
        if rows != self.chain_length || cols != self.chain_length {
            return Err(EngineError::DimensionMismatch {
                expected: self.chain_length,
                rows,
                cols,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn chain_length(&self) -> usize {
        self.chain_length
    }

    #[inline]
    pub fn bootstrap_rounds(&self) -> usize {
        self.replicates.len()
    }

    #[inline]
    pub fn plan(&self) -> &ResamplingPlan {
        &self.plan
    }

    pub fn weights(&self) -> Vec<u64> {
        self.replicates.iter().map(ReplicateAverage::weight).collect()
    }

    /// The averages of replicate `replicate`, once it has received weight.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyReplicate`] if nothing has been accumulated
    /// into the replicate, since its averages are undefined.
    pub fn replicate(&self, replicate: usize) -> Result<&ReplicateAverage, EngineError> {
        match self.replicates.get(replicate) {
            Some(average) if average.weight() > 0 => Ok(average),
            _ => Err(EngineError::EmptyReplicate { replicate }),
        }
    }

    pub fn replicates(&self) -> &[ReplicateAverage] {
        &self.replicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn assert_matrix_approx_eq(a: &DMatrix<f64>, b: &DMatrix<f64>) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < TOLERANCE, "{} != {}", x, y);
        }
    }

    fn sample(seed: f64) -> DMatrix<f64> {
        DMatrix::from_fn(3, 3, |i, j| seed * (1.0 + i as f64) + 0.1 * (i + j) as f64)
    }

    fn weighted_mean(samples: &[(u32, DMatrix<f64>)]) -> DMatrix<f64> {
        let total: u32 = samples.iter().map(|(w, _)| w).sum();
        let mut sum = DMatrix::zeros(3, 3);
        for (w, x) in samples {
            sum += x * f64::from(*w);
        }
        sum / f64::from(total)
    }

    #[test]
    fn running_average_matches_direct_weighted_mean() {
        let samples = vec![
            (1, sample(0.5)),
            (3, sample(-1.25)),
            (2, sample(4.0)),
            (1, sample(2.5)),
        ];
        let mut average = ReplicateAverage::new(3);
        for (w, x) in &samples {
            average.accumulate(*w, x, &(x * 2.0));
        }

        let expected = weighted_mean(&samples);
        assert_eq!(average.weight(), 7);
        assert_matrix_approx_eq(average.trace_mobility(), &expected);
        assert_matrix_approx_eq(average.inverse_distance(), &(expected * 2.0));
    }

    #[test]
    fn running_average_is_independent_of_order() {
        let samples = vec![
            (2, sample(1.0)),
            (1, sample(-3.0)),
            (4, sample(0.75)),
            (1, sample(10.0)),
            (3, sample(-0.5)),
        ];
        let mut forward = ReplicateAverage::new(3);
        for (w, x) in &samples {
            forward.accumulate(*w, x, x);
        }
        let mut backward = ReplicateAverage::new(3);
        for (w, x) in samples.iter().rev() {
            backward.accumulate(*w, x, x);
        }
        let mut shuffled = ReplicateAverage::new(3);
        for idx in [3, 0, 4, 2, 1] {
            let (w, x) = &samples[idx];
            shuffled.accumulate(*w, x, x);
        }

        assert_matrix_approx_eq(forward.trace_mobility(), backward.trace_mobility());
        assert_matrix_approx_eq(forward.trace_mobility(), shuffled.trace_mobility());
        assert_eq!(forward.weight(), backward.weight());
    }

    #[test]
    fn zero_weight_leaves_replicate_unchanged() {
        let mut average = ReplicateAverage::new(3);
        average.accumulate(2, &sample(1.0), &sample(1.0));
        let before = average.clone();
        average.accumulate(0, &sample(100.0), &sample(100.0));
        assert_eq!(average, before);
    }

    #[test]
    fn update_applies_plan_weights_per_replicate() {
        let plan =
            ResamplingPlan::from_index_vectors(3, &[vec![0, 1, 2], vec![2, 2, 0]]).unwrap();
        let mut accumulator = BootstrapAccumulator::new(3, plan);
        let samples = [sample(1.0), sample(2.0), sample(3.0)];
        for (conformer_id, x) in samples.iter().enumerate() {
            accumulator.update(conformer_id, x, x).unwrap();
        }

        let identity = accumulator.replicate(0).unwrap();
        assert_matrix_approx_eq(
            identity.trace_mobility(),
            &weighted_mean(&[
                (1, samples[0].clone()),
                (1, samples[1].clone()),
                (1, samples[2].clone()),
            ]),
        );

        let resampled = accumulator.replicate(1).unwrap();
        assert_matrix_approx_eq(
            resampled.trace_mobility(),
            &weighted_mean(&[(1, samples[0].clone()), (2, samples[2].clone())]),
        );
    }

    #[test]
    fn weights_are_conserved_after_full_ensemble() {
        let ensemble_size = 40;
        let plan = ResamplingPlan::new(
            ensemble_size,
            6,
            &mut <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(11),
        );
        let mut accumulator = BootstrapAccumulator::new(3, plan);
        for conformer_id in 0..ensemble_size {
            let x = sample(conformer_id as f64);
            accumulator.update(conformer_id, &x, &x).unwrap();
        }
        assert_eq!(accumulator.weights(), vec![ensemble_size as u64; 6]);
    }

    #[test]
    fn replicate_without_weight_is_reported_empty() {
        let plan = ResamplingPlan::from_index_vectors(2, &[vec![0, 1], vec![1, 1]]).unwrap();
        let mut accumulator = BootstrapAccumulator::new(3, plan);
        accumulator.update(0, &sample(1.0), &sample(1.0)).unwrap();

        assert!(accumulator.replicate(0).is_ok());
        assert!(matches!(
            accumulator.replicate(1),
            Err(EngineError::EmptyReplicate { replicate: 1 })
        ));
        assert!(matches!(
            accumulator.replicate(5),
            Err(EngineError::EmptyReplicate { replicate: 5 })
        ));
    }

    #[test]
    fn update_rejects_mismatched_matrix_shape() {
        let plan = ResamplingPlan::from_index_vectors(1, &[vec![0]]).unwrap();
        let mut accumulator = BootstrapAccumulator::new(3, plan);
        let result = accumulator.update(0, &DMatrix::zeros(2, 2), &sample(1.0));
        assert!(matches!(
            result,
            Err(EngineError::DimensionMismatch {
                expected: 3,
                rows: 2,
                cols: 2
            })
        ));
    }

    #[test]
    fn update_rejects_conformer_outside_plan() {
        let plan = ResamplingPlan::from_index_vectors(2, &[vec![0, 1]]).unwrap();
        let mut accumulator = BootstrapAccumulator::new(3, plan);
        let result = accumulator.update(2, &sample(1.0), &sample(1.0));
        assert!(matches!(
            result,
            Err(EngineError::ConformerOutOfRange {
                conformer_id: 2,
                ensemble_size: 2
            })
        ));
    }
}
