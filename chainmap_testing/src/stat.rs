//! Implements empirical tests for bucket distributions of hash functions.
use crate::generate::Generate;
use ndarray::prelude::*;
use ndarray::{ScalarOperand, Zip};
use num_traits::{Float, NumAssignOps};
use rand::prelude::*;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::fmt::Debug;

/// A result of a Chi-square test.
#[derive(Debug)]
pub struct Chi2Statistic<V> {
    pub chi2: V,
    pub dof: usize,
    pub p_value: V,
}

/// Calculates the chi-square statistic.
pub fn chi2<V>(observed: &[V], expected: &[V], dof: Option<usize>) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64>,
{
    debug_assert_eq!(observed.len(), expected.len(), "Dimensions must match");
    let chi2: V = Zip::from(observed)
        .and(expected)
        .fold(0.0.into(), |acc, &obs, &exp| {
            let diff = obs - exp;
            acc + diff.powf(2.0.into()) / exp
        });

    let dof = dof.unwrap_or(observed.len() - 1);
    let dist = ChiSquared::new(dof as f64).unwrap();
    let p_value = (1.0 - dist.cdf(chi2.to_f64().unwrap())).into();

    Chi2Statistic { chi2, dof, p_value }
}

/// Performs a Chi-square uniformity test.
pub fn chi2_uniformity<'a, V, A>(observed: A) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64> + ScalarOperand,
    A: AsArray<'a, V>,
{
    let observed: ArrayView1<V> = observed.into();
    let observed = observed.to_owned();
    let total_sum = observed.sum();
    let num_cells = observed.len();
    let expected_value = total_sum / (num_cells as f64).into();

    let expected = Array1::<V>::from_elem(observed.dim(), expected_value);

    chi2(
        observed.as_slice().unwrap(),
        expected.as_slice().unwrap(),
        None,
    )
}

/// An aggregation of p-values from multiple runs of a statistical test.
#[derive(Debug)]
pub struct PValueAggregation {
    pub outcome: bool,
    pub alpha: f64,
    pub expected_passes: f64,
    pub num_passes: usize,
    pub uniformity: Chi2Statistic<f64>,
}

/// Aggregates test results from multiple runs of a statistical test.
///
/// # Notes
///
/// Based on [Bassham et al. (2010)] which describes approaches for statistically
/// testing PRNGs and in particular - approaches to aggregation of the test results
/// (see section 4.2). P-values are binned into 10 equal intervals for the uniformity check.
///
/// [Bassham et al. (2010)]: https://doi.org/10.6028/NIST.SP.800-22r1a
pub fn aggregate_p_values(p_values: &[f64], alpha: f64) -> PValueAggregation {
    const NUM_BINS: usize = 10;

    let num_trials = p_values.len() as f64;
    let pass_rate = 1.0 - alpha;
    let confidence = 3.0 * ((pass_rate * (1.0 - pass_rate)) / num_trials).sqrt();
    let expected_passes = num_trials * (pass_rate - confidence);
    let num_passes = p_values.iter().filter(|&&p| p >= alpha).count();

    let mut bins = Array1::<f64>::zeros(NUM_BINS);
    for &p in p_values {
        let bin = ((p * NUM_BINS as f64) as usize).min(NUM_BINS - 1);
        bins[bin] += 1.0;
    }
    let uniformity = chi2_uniformity(&bins);

    let outcome = num_passes as f64 >= expected_passes && uniformity.p_value > alpha;

    PValueAggregation {
        outcome,
        alpha,
        expected_passes,
        num_passes,
        uniformity,
    }
}

type HashFunctionFamily<R, K> = dyn Fn(&mut R) -> Box<dyn Fn(&K) -> usize>;

/// Empirically verifies that a hash function family spreads random keys evenly over buckets.
///
/// # Parameters
///
/// - `rng`: A random number generator used to create keys and to draw hash functions.
/// - `family`: Draws a random hash function from the family.
/// - `num_buckets`: The number of buckets the functions hash into.
/// - `keys_per_bucket`: The expected number of keys per bucket in each trial.
/// - `num_trials`: The number of hash functions to draw.
/// - `alpha`: Significance level of each individual test.
pub fn bucket_uniformity<R, K>(
    rng: &mut R,
    family: &HashFunctionFamily<R, K>,
    num_buckets: usize,
    keys_per_bucket: usize,
    num_trials: usize,
    alpha: f64,
) -> PValueAggregation
where
    R: Rng,
    K: Debug + Generate<R>,
{
    let params = <K as Generate<R>>::GenerateParams::default();
    let mut p_values = Vec::with_capacity(num_trials);

    for _ in 0..num_trials {
        let hash_fn = family(rng);
        let mut observed = Array1::<f64>::zeros(num_buckets);

        for _ in 0..num_buckets * keys_per_bucket {
            let key = K::generate(rng, &params);
            let bucket = hash_fn(&key);
            debug_assert!(bucket < num_buckets, "Key {:?} hashed out of range", key);
            observed[bucket] += 1.0;
        }

        p_values.push(chi2_uniformity(&observed).p_value);
    }

    aggregate_p_values(&p_values, alpha)
}
