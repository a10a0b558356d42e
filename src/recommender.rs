use std::path::Path;

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use tracing::debug;

use crate::encoder::EncodingTable;
use crate::error::{Error, Result};
use crate::index::NeighborIndex;
use crate::loader;
use crate::params::Params;
use crate::types::{Column, DestinationRecord, FeatureVector, Match, Preferences, Recommendation};

/// Fitted encoder plus index. Built once, then queried through `&self`.
pub struct Recommender {
    encoding: EncodingTable,
    index: NeighborIndex,
    params: Params,
}

impl Recommender {
    pub fn new(records: Vec<DestinationRecord>) -> Result<Self> {
        Self::with_params(records, Params::default())
    }

    pub fn with_params(records: Vec<DestinationRecord>, params: Params) -> Result<Self> {
        if params.k == 0 {
            return Err(Error::InvalidQuery("k must be at least 1".into()));
        }
        let encoding = EncodingTable::fit(&records);
        let index = NeighborIndex::build(records, &encoding)?;
        Ok(Self {
            encoding,
            index,
            params,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let report = loader::load_path(path)?;
        Self::new(report.records)
    }

    pub fn recommend(&self, prefs: &Preferences) -> Result<Recommendation> {
        self.recommend_with_k(prefs, self.params.k)
    }

    pub fn recommend_with_k(&self, prefs: &Preferences, k: usize) -> Result<Recommendation> {
        if k == 0 {
            return Err(Error::InvalidQuery("k must be at least 1".into()));
        }
        let query = self.assemble(prefs)?;
        let neighbors = self.index.query(&query, k);
        debug!(k, found = neighbors.len(), "query answered");

        let records = self.index.records();
        let matches: Vec<Match> = neighbors
            .into_iter()
            .map(|n| {
                let record = records[n.row].clone();
                Match {
                    row: n.row,
                    cost_per_day: record.cost_per_day(),
                    record,
                    distance: n.distance,
                }
            })
            .collect();

        // min_by_key keeps the first of equal minima
        let cheapest = matches
            .iter()
            .enumerate()
            .min_by_key(|(_, m)| OrderedFloat(m.cost_per_day))
            .map(|(i, _)| i)
            .ok_or(Error::EmptyDataset)?;

        Ok(Recommendation { matches, cheapest })
    }

    pub fn recommend_batch(&self, prefs: &[Preferences]) -> Vec<Result<Recommendation>> {
        prefs.par_iter().map(|p| self.recommend(p)).collect()
    }

    /// Feature vector for a query, in the same column order as the index.
    pub fn assemble(&self, prefs: &Preferences) -> Result<FeatureVector> {
        if !prefs.budget.is_finite() {
            return Err(Error::InvalidQuery(format!(
                "budget must be a finite number, got {}",
                prefs.budget
            )));
        }
        if prefs.duration_days == 0 {
            return Err(Error::InvalidQuery("duration must be at least 1 day".into()));
        }
        Ok(FeatureVector::new(
            prefs.budget,
            self.encoding.encode(Column::TravelType, prefs.category(Column::TravelType))?,
            self.encoding.encode(Column::Climate, prefs.category(Column::Climate))?,
            f64::from(prefs.duration_days),
            self.encoding.encode(Column::Season, prefs.category(Column::Season))?,
        ))
    }

    /// Values a caller may offer for a column.
    pub fn options(&self, column: Column) -> &[String] {
        self.encoding.values(column)
    }

    pub fn encoding(&self) -> &EncodingTable {
        &self.encoding
    }

    pub fn index(&self) -> &NeighborIndex {
        &self.index
    }

    pub fn params(&self) -> Params {
        self.params
    }
}
