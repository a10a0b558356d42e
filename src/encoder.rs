//! Label encoding for the categorical columns.
//!
//! Codes are assigned in sorted order of the distinct observed values, so the
//! same set of values always gets the same codes whatever the row order.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Column, DestinationRecord};

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct ColumnEncoder {
    values: Vec<String>,
    codes: HashMap<String, u32>,
}

impl ColumnEncoder {
    pub fn fit<'a, I>(observed: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let values: Vec<String> = observed
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let codes = values
            .iter()
            .enumerate()
            .map(|(code, v)| (v.clone(), code as u32))
            .collect();
        Self { values, codes }
    }

    pub fn encode(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    pub fn decode(&self, code: u32) -> Option<&str> {
        self.values.get(code as usize).map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One fitted encoder per categorical column. Immutable once built.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct EncodingTable {
    travel_type: ColumnEncoder,
    climate: ColumnEncoder,
    season: ColumnEncoder,
}

impl EncodingTable {
    pub fn fit(records: &[DestinationRecord]) -> Self {
        let fit_column = |column: Column| {
            ColumnEncoder::fit(records.iter().map(|r| r.category(column)))
        };
        Self {
            travel_type: fit_column(Column::TravelType),
            climate: fit_column(Column::Climate),
            season: fit_column(Column::Season),
        }
    }

    pub fn column(&self, column: Column) -> &ColumnEncoder {
        match column {
            Column::TravelType => &self.travel_type,
            Column::Climate => &self.climate,
            Column::Season => &self.season,
        }
    }

    pub fn encode(&self, column: Column, value: &str) -> Result<u32> {
        self.column(column)
            .encode(value)
            .ok_or_else(|| Error::UnknownCategory {
                column,
                value: value.to_string(),
            })
    }

    pub fn decode(&self, column: Column, code: u32) -> Option<&str> {
        self.column(column).decode(code)
    }

    /// Observed vocabulary of a column, in code order.
    pub fn values(&self, column: Column) -> &[String] {
        self.column(column).values()
    }
}
