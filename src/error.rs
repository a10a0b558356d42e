use thiserror::Error;

use crate::types::Column;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no usable destinations: every row was dropped during cleaning")]
    EmptyDataset,

    #[error("unknown {column} value: {value:?}")]
    UnknownCategory { column: Column, value: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("missing column in header: {0}")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
