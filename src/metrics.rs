use space::Metric as SpaceMetric;

use crate::types::FeatureVector;

/// Plain Euclidean distance, no per-dimension weights.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanMetric;

// Distances are never negative, so the bit pattern of the f64 orders the same
// way as the value.
impl SpaceMetric<FeatureVector> for EuclideanMetric {
    type Unit = u64;
    fn distance(&self, a: &FeatureVector, b: &FeatureVector) -> Self::Unit {
        euclidean(a.as_slice(), b.as_slice()).to_bits()
    }
}
