use rayon::prelude::*;
use space::Metric as SpaceMetric;
use tracing::debug;

use crate::encoder::EncodingTable;
use crate::error::{Error, Result};
use crate::metrics::EuclideanMetric;
use crate::types::{Column, DestinationRecord, FeatureVector, Neighbor};

/// Exact nearest-neighbour index over the encoded destinations.
///
/// Features stay in raw units: cost and duration are not scaled against the
/// small integer category codes, so they dominate the distance.
pub struct NeighborIndex {
    metric: EuclideanMetric,
    features: Vec<FeatureVector>,
    records: Vec<DestinationRecord>,
}

impl NeighborIndex {
    pub fn build(records: Vec<DestinationRecord>, encoding: &EncodingTable) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let features = records
            .iter()
            .map(|r| encode_record(r, encoding))
            .collect::<Result<Vec<_>>>()?;
        debug!(rows = features.len(), "neighbor index built");
        Ok(Self {
            metric: EuclideanMetric,
            features,
            records,
        })
    }

    /// The `k` closest rows, nearest first. Equal distances keep row order.
    pub fn query(&self, query: &FeatureVector, k: usize) -> Vec<Neighbor> {
        let real_k = k.min(self.features.len());
        let mut scored: Vec<(u64, usize)> = self
            .features
            .iter()
            .enumerate()
            .map(|(row, f)| (self.metric.distance(query, f), row))
            .collect();
        scored.sort_unstable();
        scored.truncate(real_k);
        scored
            .into_iter()
            .map(|(bits, row)| Neighbor {
                row,
                distance: f64::from_bits(bits),
            })
            .collect()
    }

    pub fn query_batch(&self, queries: &[FeatureVector], k: usize) -> Vec<Vec<Neighbor>> {
        queries.par_iter().map(|q| self.query(q, k)).collect()
    }

    pub fn record(&self, row: usize) -> Option<&DestinationRecord> {
        self.records.get(row)
    }

    pub fn feature(&self, row: usize) -> Option<&FeatureVector> {
        self.features.get(row)
    }

    pub fn records(&self) -> &[DestinationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

pub fn encode_record(record: &DestinationRecord, encoding: &EncodingTable) -> Result<FeatureVector> {
    Ok(FeatureVector::new(
        record.cost,
        encoding.encode(Column::TravelType, &record.travel_type)?,
        encoding.encode(Column::Climate, &record.climate)?,
        f64::from(record.duration_days),
        encoding.encode(Column::Season, &record.season)?,
    ))
}
