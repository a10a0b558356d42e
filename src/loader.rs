//! Reading and cleaning the destinations CSV.
//!
//! Every data row either becomes a [`DestinationRecord`] or is dropped with a
//! [`RowRejection`] saying why. Nothing is coerced into a default.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::types::DestinationRecord;

pub const DESTINATION: &str = "Destination";
pub const COST: &str = "Cost";
pub const TYPE: &str = "Type";
pub const CLIMATE: &str = "Climate";
pub const SEASON: &str = "Season";
pub const DURATION_DAYS: &str = "Duration_days";

pub const HEADERS: [&str; 6] = [DESTINATION, COST, TYPE, CLIMATE, SEASON, DURATION_DAYS];

/// Why a row did not make it into the dataset.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum RowRejection {
    Missing(String),
    Unparsable { field: String, value: String },
    OutOfRange { field: String, value: String },
    Malformed(String),
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::Missing(field) => write!(f, "missing {field}"),
            RowRejection::Unparsable { field, value } => {
                write!(f, "{field} is not a number: {value:?}")
            }
            RowRejection::OutOfRange { field, value } => {
                write!(f, "{field} out of range: {value:?}")
            }
            RowRejection::Malformed(msg) => write!(f, "malformed row: {msg}"),
        }
    }
}

/// Positions of the required columns within the header row.
#[derive(Clone, Copy, Debug)]
pub struct ColumnMap {
    destination: usize,
    cost: usize,
    travel_type: usize,
    climate: usize,
    season: usize,
    duration_days: usize,
}

impl ColumnMap {
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        Ok(Self {
            destination: find(DESTINATION)?,
            cost: find(COST)?,
            travel_type: find(TYPE)?,
            climate: find(CLIMATE)?,
            season: find(SEASON)?,
            duration_days: find(DURATION_DAYS)?,
        })
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct LoadReport {
    pub records: Vec<DestinationRecord>,
    /// `(line, reason)` for every dropped row; lines are 1-based and count the header.
    pub rejected: Vec<(u64, RowRejection)>,
}

pub fn load_path<P: AsRef<Path>>(path: P) -> Result<LoadReport> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading destinations");
    let file = File::open(path)?;
    load_reader(file)
}

pub fn load_reader<R: Read>(reader: R) -> Result<LoadReport> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let columns = ColumnMap::from_headers(rdr.headers()?)?;

    let mut report = LoadReport::default();
    for (i, row) in rdr.records().enumerate() {
        let fallback_line = i as u64 + 2;
        let outcome = match row {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line());
                (line, clean_row(&record, &columns))
            }
            Err(e) => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                (line, Err(RowRejection::Malformed(e.to_string())))
            }
        };
        match outcome {
            (_, Ok(record)) => report.records.push(record),
            (line, Err(reason)) => {
                warn!(line, %reason, "dropping row");
                report.rejected.push((line, reason));
            }
        }
    }

    info!(
        kept = report.records.len(),
        dropped = report.rejected.len(),
        "destinations loaded"
    );
    if report.records.is_empty() {
        return Err(Error::EmptyDataset);
    }
    Ok(report)
}

/// Turns one raw CSV row into a record, or says why it can't be used.
pub fn clean_row(
    row: &StringRecord,
    columns: &ColumnMap,
) -> std::result::Result<DestinationRecord, RowRejection> {
    let field = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");

    let cost = parse_cost(field(columns.cost))?;
    let travel_type = required(TYPE, field(columns.travel_type))?;
    let climate = required(CLIMATE, field(columns.climate))?;
    let season = required(SEASON, field(columns.season))?;
    let duration_days = parse_duration(field(columns.duration_days))?;

    Ok(DestinationRecord {
        name: field(columns.destination).to_string(),
        cost,
        duration_days,
        travel_type,
        climate,
        season,
    })
}

fn required(name: &str, value: &str) -> std::result::Result<String, RowRejection> {
    if value.is_empty() {
        Err(RowRejection::Missing(name.to_string()))
    } else {
        Ok(value.to_string())
    }
}

fn parse_number(name: &str, value: &str) -> std::result::Result<f64, RowRejection> {
    if value.is_empty() {
        return Err(RowRejection::Missing(name.to_string()));
    }
    value.parse::<f64>().map_err(|_| RowRejection::Unparsable {
        field: name.to_string(),
        value: value.to_string(),
    })
}

fn out_of_range(name: &str, value: &str) -> RowRejection {
    RowRejection::OutOfRange {
        field: name.to_string(),
        value: value.to_string(),
    }
}

pub fn parse_cost(value: &str) -> std::result::Result<f64, RowRejection> {
    let cost = parse_number(COST, value)?;
    if !cost.is_finite() || cost < 0.0 {
        return Err(out_of_range(COST, value));
    }
    // normalise -0.0
    Ok(cost + 0.0)
}

/// Whole numbers only; `4.0` is accepted as 4.
pub fn parse_duration(value: &str) -> std::result::Result<u32, RowRejection> {
    let days = parse_number(DURATION_DAYS, value)?;
    if !days.is_finite() || days.fract() != 0.0 || days < 1.0 || days > f64::from(u32::MAX) {
        return Err(out_of_range(DURATION_DAYS, value));
    }
    Ok(days as u32)
}
